//! Account details HTMX endpoints
//!
//! Endpoints:
//! - htmx_lookup_account: Submit the lookup form (HTML fragment)

use super::page::render_lookup_form;
use crate::routes::forms::apply_submitted;
use crate::{ApiError, AppState};
use axum::extract::Form;
use axum::response::Html;
use financeflow_core::lock_form;
use std::collections::HashMap;
use std::time::Instant;

/// HTMX: Look up an account and show its balance
pub async fn htmx_lookup_account(
    state: axum::extract::State<AppState>,
    params: Form<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    apply_submitted(&state.forms.lookup, &params);
    state.workflows.lookup(&state.forms.lookup).await?;
    Ok(Html(render_lookup_form(&mut lock_form(&state.forms.lookup), Instant::now())))
}
