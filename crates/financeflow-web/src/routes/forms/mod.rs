//! Form routes - per-keystroke edits and notification polling
//!
//! Structure:
//! - api.rs: HTMX endpoints
//! - widgets.rs: Inputs, error slots, notifications and buttons shared by all forms

pub mod api;
pub mod widgets;

pub use api::{apply_submitted, htmx_field_edit, htmx_notification};
