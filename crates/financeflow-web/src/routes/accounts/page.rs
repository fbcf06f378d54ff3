//! Add-account page rendering
//!
//! Endpoints:
//! - page_add_account: Create-account form with recently added accounts
//!
//! Helper functions:
//! - render_create_form: The form partial, also returned by submissions
//! - render_account_list: Account references linking to their details

use crate::routes::forms::widgets::{form_open, notification, submit_button, text_input};
use crate::AppState;
use financeflow_core::{lock_form, AccountRef, Field, FormKind, FormState, NewAccountDraft};
use std::time::Instant;

/// Add-account page
pub async fn page_add_account(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let form = render_create_form(&mut lock_form(&state.forms.create), Instant::now());
    let recent = state.store().recent(state.config.accounts.recent_limit);

    let inner_content = format!(
        r#"<h1 class='text-xl sm:text-2xl font-bold mb-4 sm:mb-6'>Add New Account</h1>
        <div class='grid grid-cols-1 xl:grid-cols-2 gap-6 lg:gap-8'>
            <div class='space-y-6'>
                <div class='bg-white p-4 sm:p-6 rounded-lg border border-gray-200'>
                    <h2 class='text-lg font-semibold mb-4'>Create New Account</h2>
                    <p class='text-gray-600 mb-6 text-sm sm:text-base'>Create a new financial account with initial balance</p>
                    {}
                </div>
            </div>
            <div class='xl:mt-0'>{}</div>
        </div>"#,
        form,
        render_account_list(&recent, "Recently Added Accounts")
    );

    axum::response::Html(crate::page_response(&headers, "Add Account", "/add-account", &inner_content))
}

/// Create-account form partial
pub fn render_create_form(state: &mut FormState<NewAccountDraft>, now: Instant) -> String {
    format!(
        r#"{}
            <div class='space-y-4'>
                {}
                {}
            </div>
            {}
            {}
        </form>"#,
        form_open(FormKind::CreateAccount, "/add-account"),
        text_input(state, Field::AccountId, "Account ID"),
        text_input(state, Field::InitialBalance, "Initial Balance ($)"),
        submit_button("Create Account", "Creating Account..."),
        notification(state, now)
    )
}

/// Account list card, oldest first
pub fn render_account_list(accounts: &[AccountRef], title: &str) -> String {
    if accounts.is_empty() {
        return format!(
            r#"<div id='account-list' class='bg-gray-50 rounded-lg p-4 sm:p-6 text-center h-fit'>
                <h2 class='text-base sm:text-lg font-semibold mb-4 text-gray-800'>{}</h2>
                <div class='flex flex-col items-center text-gray-500'>
                    <span class='text-5xl mb-2 opacity-50'>&#128091;</span>
                    <p class='text-sm sm:text-base'>No accounts available</p>
                </div>
            </div>"#,
            title
        );
    }

    let rows: Vec<String> = accounts
        .iter()
        .map(|account| {
            format!(
                r#"<a href='/account-details?account_id={id}' class='block p-3 sm:p-4 hover:bg-gray-50 transition-colors'>
                    <div class='flex items-center justify-between gap-3'>
                        <div class='flex items-center gap-3 min-w-0 flex-1'>
                            <div class='w-8 h-8 bg-indigo-50 rounded-lg flex items-center justify-center flex-shrink-0'>&#128091;</div>
                            <p class='font-medium text-gray-900 text-sm sm:text-base truncate'>Account Id #{id}</p>
                        </div>
                        <div class='flex items-center gap-1 text-xs sm:text-sm text-gray-500 flex-shrink-0'>
                            <span>{created}</span>
                        </div>
                    </div>
                </a>"#,
                id = account.account_id,
                created = account.created_at_display()
            )
        })
        .collect();

    format!(
        r#"<div id='account-list' class='bg-white rounded-lg border border-gray-200 max-h-[calc(100vh-200px)] flex flex-col'>
            <div class='px-4 sm:px-6 py-3 sm:py-4 border-b border-gray-200 flex-shrink-0'>
                <h2 class='text-base sm:text-lg font-semibold text-gray-800'>{}</h2>
            </div>
            <div class='divide-y divide-gray-100 overflow-y-auto flex-1'>{}</div>
        </div>"#,
        title,
        rows.join("")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_account_list() {
        let html = render_account_list(&[], "Available Accounts");
        assert!(html.contains("Available Accounts"));
        assert!(html.contains("No accounts available"));
    }

    #[test]
    fn test_account_list_links_to_details() {
        let created = Utc.with_ymd_and_hms(2025, 3, 4, 14, 7, 0).unwrap();
        let html = render_account_list(&[AccountRef::projected(12345, created)], "Recently Added Accounts");
        assert!(html.contains("Account Id #12345"));
        assert!(html.contains("href='/account-details?account_id=12345'"));
        assert!(html.contains("Mar 04, 2025, 02:07 PM"));
    }

    #[test]
    fn test_create_form_shows_field_errors() {
        let mut state: FormState<NewAccountDraft> = FormState::default();
        state.set_field(Field::AccountId, "12");
        state.begin_submit().unwrap();

        let html = render_create_form(&mut state, Instant::now());
        assert!(html.contains("Account ID should be greater then or equal to 3 digit"));
        assert!(html.contains("Initial Balance is required"));
        assert!(html.contains("Creating Account..."));
    }
}
