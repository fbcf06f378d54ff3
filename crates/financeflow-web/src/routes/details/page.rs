//! Account details page rendering
//!
//! Endpoints:
//! - page_account_details: Account lookup, optionally preselecting an id

use crate::routes::forms::widgets::{form_open, notification, selector_input, submit_button};
use crate::AppState;
use axum::extract::Query;
use financeflow_core::{format_balance, lock_form, AccountDetail, Field, FormKind, FormState, LookupDraft};
use financeflow_utils::escape_html;
use std::collections::HashMap;
use std::time::Instant;

/// Account details page. `?account_id=` preselects an account from a list.
pub async fn page_account_details(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    params: Query<HashMap<String, String>>,
) -> axum::response::Html<String> {
    let form = {
        let mut lookup = lock_form(&state.forms.lookup);
        if let Some(account_id) = params.get("account_id").filter(|id| !id.is_empty()) {
            if !lookup.is_submitting() {
                lookup.set_field(Field::AccountId, account_id);
            }
        }
        render_lookup_form(&mut lookup, Instant::now())
    };

    let inner_content = format!(
        r#"<h1 class='text-xl sm:text-2xl font-bold mb-4 sm:mb-6'>Search Account</h1>
        <div class='grid grid-cols-1 gap-6 lg:gap-8'>
            <div class='space-y-6'>
                <div class='bg-white p-4 sm:p-6 rounded-lg border border-gray-200'>
                    <h2 class='text-lg font-semibold mb-4'>Account Search</h2>
                    <p class='text-gray-600 mb-6 text-sm sm:text-base'>Enter the account ID to fetch account details and balance</p>
                    {}
                </div>
            </div>
        </div>"#,
        form
    );

    axum::response::Html(crate::page_response(&headers, "Account Details", "/account-details", &inner_content))
}

/// Balance line for a looked-up account
pub fn render_balance(detail: Option<&AccountDetail>) -> String {
    match detail {
        Some(detail) => format!(
            r#"<div id='lookup-output' class='flex flex-col sm:flex-row sm:items-center p-3 bg-gray-50 rounded w-full sm:w-fit mt-4'>
                <span class='font-medium text-gray-700 text-sm sm:text-base'>Current Balance:</span>
                <span class='text-green-600 font-semibold text-sm sm:text-base'>&nbsp;${}</span>
            </div>"#,
            escape_html(&format_balance(&detail.balance))
        ),
        None => "<div id='lookup-output'></div>".to_string(),
    }
}

/// Lookup form partial
pub fn render_lookup_form(state: &mut FormState<LookupDraft>, now: Instant) -> String {
    format!(
        r#"{}
            <div class='flex flex-col sm:flex-row gap-4'>
                <div class='w-full sm:w-1/3'>{}</div>
                <div class='flex items-start pt-6'>{}</div>
            </div>
            {}
            <div class='w-full sm:w-1/3'>{}</div>
        </form>"#,
        form_open(FormKind::Lookup, "/account-details"),
        selector_input(state, Field::AccountId, "Account ID", ""),
        submit_button("Search Account", "Searching...").replace("w-full mt-6", "w-full sm:w-auto"),
        render_balance(state.output()),
        notification(state, now)
    )
}
