//! Account detail routes - balance lookup by account id
//!
//! Structure:
//! - api.rs: HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::htmx_lookup_account;
pub use page::{page_account_details, render_balance, render_lookup_form};
