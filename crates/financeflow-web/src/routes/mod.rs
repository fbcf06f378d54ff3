//! Route modules for the web front end
//!
//! - accounts: Create account, account lists, selector suggestions
//! - details: Account balance lookup
//! - transfer: Funds transfer and confirmation
//! - forms: Field edits, notifications and shared widgets
//!
//! Each page module follows the same structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: HTMX page rendering

pub mod accounts;
pub mod details;
pub mod forms;
pub mod transfer;
