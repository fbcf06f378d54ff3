//! Transfer routes - funds transfer between internal accounts
//!
//! Structure:
//! - api.rs: HTMX endpoints
//! - page.rs: Full page rendering and the confirmation modal

pub mod api;
pub mod page;

pub use api::{htmx_transfer, htmx_transfer_dismiss};
pub use page::{page_transfer, render_success_modal, render_transfer_form};
