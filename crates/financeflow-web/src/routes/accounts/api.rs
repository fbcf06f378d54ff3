//! Account API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_accounts: Known account references (JSON)
//! - htmx_create_account: Submit the create-account form (HTML fragment)
//! - htmx_account_suggest: Selector popup candidates (HTML fragment)

use super::page::{render_account_list, render_create_form};
use crate::routes::forms::apply_submitted;
use crate::routes::forms::widgets::input_id;
use crate::{ApiError, AppState};
use axum::extract::{Form, Query};
use axum::response::Html;
use axum::Json;
use financeflow_core::{
    lock_form, AccountRef, Draft, Field, FormKind, LookupDraft, NewAccountDraft, Selector, Submission, TransferDraft,
};
use std::collections::HashMap;
use std::time::Instant;

/// Known account references in insertion order (JSON API)
pub async fn api_accounts(state: axum::extract::State<AppState>) -> Json<Vec<AccountRef>> {
    Json(state.store().snapshot())
}

/// HTMX: Create account - re-renders the form and, on success, the account list
pub async fn htmx_create_account(
    state: axum::extract::State<AppState>,
    params: Form<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    apply_submitted(&state.forms.create, &params);
    let outcome = state.workflows.create_account(&state.forms.create).await?;

    let mut html = render_create_form(&mut lock_form(&state.forms.create), Instant::now());
    if let Submission::Completed(_) = outcome {
        let recent = state.store().recent(state.config.accounts.recent_limit);
        html.push_str(&render_account_list(&recent, "Recently Added Accounts").replacen(
            "id='account-list'",
            "id='account-list' hx-swap-oob='true'",
            1,
        ));
    }
    Ok(Html(html))
}

/// HTMX: Account suggestions for a selector popup
///
/// Query: `form` and `field` name the selector, and the field's current value
/// is sent under its own name. The input's DOM id is derived from both.
pub async fn htmx_account_suggest(
    state: axum::extract::State<AppState>,
    query: Query<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let kind: FormKind = query
        .get("form")
        .ok_or_else(|| ApiError::BadRequest { message: "Missing form name".to_string() })?
        .parse()
        .map_err(|message| ApiError::BadRequest { message })?;
    let field: Field = query
        .get("field")
        .ok_or_else(|| ApiError::BadRequest { message: "Missing field name".to_string() })?
        .parse()
        .map_err(|message| ApiError::BadRequest { message })?;
    if !field.is_account_id() || !form_fields(kind).contains(&field) {
        return Err(ApiError::BadRequest {
            message: format!("Field {} has no selector on the {} form", field, kind),
        });
    }
    let input = input_id(kind, field);
    let value = query.get(field.name()).map(String::as_str).unwrap_or_default();

    let mut selector = Selector::new(value);
    selector.focus();
    let ids = state.store().ids();
    let matches = selector.matches(&ids);

    let options: Vec<String> = matches
        .iter()
        .map(|id| {
            format!(
                r#"<div data-value='{id}' onclick="selectorPick('{input}', '{id}')" class='px-3 py-2 hover:bg-blue-50 cursor-pointer border-b border-gray-100 last:border-b-0'><div class='font-medium text-gray-900'>{id}</div></div>"#,
                id = id,
                input = input
            )
        })
        .collect();

    if options.is_empty() {
        return Ok(Html(String::new()));
    }
    Ok(Html(format!(
        r#"<div class='absolute z-50 w-full mt-1 bg-white border border-gray-200 rounded-md shadow-lg max-h-60 overflow-y-auto'>{}</div>"#,
        options.join("")
    )))
}

fn form_fields(kind: FormKind) -> &'static [Field] {
    match kind {
        FormKind::CreateAccount => NewAccountDraft::FIELDS,
        FormKind::Lookup => LookupDraft::FIELDS,
        FormKind::Transfer => TransferDraft::FIELDS,
    }
}
