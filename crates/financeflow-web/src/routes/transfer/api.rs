//! Transfer HTMX endpoints
//!
//! Endpoints:
//! - htmx_transfer: Submit the transfer form (HTML fragment)
//! - htmx_transfer_dismiss: Close the confirmation modal (HTML fragment)

use super::page::render_transfer_form;
use crate::routes::forms::apply_submitted;
use crate::{ApiError, AppState};
use axum::extract::Form;
use axum::response::Html;
use financeflow_core::lock_form;
use std::collections::HashMap;
use std::time::Instant;

/// HTMX: Transfer funds between two accounts
pub async fn htmx_transfer(
    state: axum::extract::State<AppState>,
    params: Form<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    apply_submitted(&state.forms.transfer, &params);
    state.workflows.transfer(&state.forms.transfer).await?;
    Ok(Html(render_transfer_form(&mut lock_form(&state.forms.transfer), Instant::now())))
}

/// HTMX: Dismiss the transfer confirmation
pub async fn htmx_transfer_dismiss(state: axum::extract::State<AppState>) -> Html<String> {
    let mut form = lock_form(&state.forms.transfer);
    form.clear_output();
    Html(render_transfer_form(&mut form, Instant::now()))
}
