//! Field edit and notification endpoints
//!
//! Endpoints:
//! - htmx_field_edit: Apply one keystroke to a form field (HTML fragment)
//! - htmx_notification: Current notification of a form (HTML fragment)

use super::widgets::{error_slot, notification};
use crate::{ApiError, AppState};
use axum::extract::{Form, Path};
use axum::response::Html;
use financeflow_core::{lock_form, Draft, Field, FormKind, SharedForm};
use std::collections::HashMap;
use std::time::Instant;

/// Copy submitted field values into a form.
/// Ignored while the form is submitting; the submit itself is then refused.
pub fn apply_submitted<D: Draft>(form: &SharedForm<D>, params: &HashMap<String, String>) {
    let mut state = lock_form(form);
    if state.is_submitting() {
        return;
    }
    for field in D::FIELDS {
        if let Some(value) = params.get(field.name()) {
            state.set_field(*field, value);
        }
    }
}

fn apply_edit<D: Draft>(form: &SharedForm<D>, field: Field, value: &str) -> Result<(), ApiError> {
    if lock_form(form).set_field(field, value) {
        Ok(())
    } else {
        Err(ApiError::BadRequest {
            message: format!("Field {} does not belong to the {} form", field, D::KIND),
        })
    }
}

fn parse_form(form: &str) -> Result<FormKind, ApiError> {
    form.parse().map_err(|_| ApiError::NotFound {
        resource: format!("form {}", form),
    })
}

/// HTMX: Field edit - filters and stores the value, clears that field's error
pub async fn htmx_field_edit(
    state: axum::extract::State<AppState>,
    path: Path<String>,
    params: Form<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let kind = parse_form(&path.0)?;
    let field: Field = params
        .get("field")
        .ok_or_else(|| ApiError::BadRequest { message: "Missing field name".to_string() })?
        .parse()
        .map_err(|message| ApiError::BadRequest { message })?;
    let value = params.get(field.name()).map(String::as_str).unwrap_or_default();

    let forms = &state.forms;
    match kind {
        FormKind::CreateAccount => apply_edit(&forms.create, field, value)?,
        FormKind::Lookup => apply_edit(&forms.lookup, field, value)?,
        FormKind::Transfer => apply_edit(&forms.transfer, field, value)?,
    }

    let mut html = error_slot(kind, field, None);
    if kind == FormKind::Lookup {
        // Any edit hides the balance of the previously looked-up account
        html.push_str("<div id='lookup-output' hx-swap-oob='true'></div>");
    }
    Ok(Html(html))
}

/// HTMX: Notification slot - empty once the notification has expired
pub async fn htmx_notification(
    state: axum::extract::State<AppState>,
    path: Path<String>,
) -> Result<Html<String>, ApiError> {
    let now = Instant::now();
    let forms = &state.forms;
    let html = match parse_form(&path.0)? {
        FormKind::CreateAccount => notification(&mut lock_form(&forms.create), now),
        FormKind::Lookup => notification(&mut lock_form(&forms.lookup), now),
        FormKind::Transfer => notification(&mut lock_form(&forms.transfer), now),
    };
    Ok(Html(html))
}
