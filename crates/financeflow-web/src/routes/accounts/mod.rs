//! Account routes - Account creation and account lists
//!
//! Features:
//! - Create-account form with validation and notifications
//! - Recently added accounts, linking to their details
//! - Candidate popup for account selectors
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{api_accounts, htmx_account_suggest, htmx_create_account};
pub use page::{page_add_account, render_account_list, render_create_form};
