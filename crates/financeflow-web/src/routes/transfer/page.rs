//! Transfer page rendering
//!
//! Endpoints:
//! - page_transfer: Transfer form with available accounts
//!
//! Helper functions:
//! - render_transfer_form: The form partial, including the confirmation modal
//! - render_success_modal: Confirmation shown after a completed transfer

use crate::routes::accounts::render_account_list;
use crate::routes::forms::widgets::{form_open, notification, selector_input, submit_button, text_input};
use crate::AppState;
use financeflow_core::{format_balance, lock_form, Field, FormKind, FormState, TransferDraft, TransferReceipt};
use financeflow_utils::escape_html;
use std::time::Instant;

/// Transfer page
pub async fn page_transfer(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let form = render_transfer_form(&mut lock_form(&state.forms.transfer), Instant::now());
    let accounts = state.store().snapshot();

    let inner_content = format!(
        r#"<h1 class='text-xl sm:text-2xl font-bold mb-4 sm:mb-6'>Transfer Funds</h1>
        <div class='grid grid-cols-1 xl:grid-cols-2 gap-6 lg:gap-8'>
            <div class='space-y-6'>
                <div class='bg-white p-4 sm:p-6 rounded-lg border border-gray-200'>
                    <h2 class='text-lg font-semibold mb-4'>Fund Transfer</h2>
                    <p class='text-gray-600 mb-6 text-sm sm:text-base'>Transfer money between internal accounts</p>
                    {}
                </div>
            </div>
            <div class='xl:mt-0'>{}</div>
        </div>"#,
        form,
        render_account_list(&accounts, "Available Accounts")
    );

    axum::response::Html(crate::page_response(&headers, "Transfer Funds", "/transfer", &inner_content))
}

/// Transfer form partial
pub fn render_transfer_form(state: &mut FormState<TransferDraft>, now: Instant) -> String {
    let modal = state.output().map(render_success_modal).unwrap_or_default();
    format!(
        r#"{}
            <div class='space-y-4'>
                {}
                {}
                {}
            </div>
            {}
            {}
            {}
        </form>"#,
        form_open(FormKind::Transfer, "/transfer"),
        selector_input(state, Field::SourceAccountId, "Source Account ID", "Enter Source Account Id"),
        selector_input(state, Field::DestinationAccountId, "Destination Account ID", "Enter Destination Account Id"),
        text_input(state, Field::Amount, "Transfer Amount ($)"),
        submit_button("Transfer Funds", "Processing Transfer..."),
        notification(state, now),
        modal
    )
}

/// Confirmation modal for a completed transfer
pub fn render_success_modal(receipt: &TransferReceipt) -> String {
    format!(
        r#"<div id='transfer-modal' class='fixed inset-0 z-50 flex items-center justify-center bg-black bg-opacity-50'>
            <div class='bg-white rounded-lg shadow-xl max-w-md w-full mx-4 p-6'>
                <div class='flex flex-col items-center text-center'>
                    <div class='w-16 h-16 bg-green-100 rounded-full flex items-center justify-center mb-4 text-3xl text-green-600'>&#10003;</div>
                    <h3 class='text-lg font-semibold text-gray-900 mb-2'>Transfer Successful</h3>
                    <p class='text-gray-600 mb-6'>Your fund transfer has been completed successfully!</p>
                </div>
                <div class='bg-gray-50 rounded-lg p-4 mb-6 space-y-2'>
                    <div class='flex justify-between'><span class='text-gray-600'>From Account:</span><span class='font-medium'>{}</span></div>
                    <div class='flex justify-between'><span class='text-gray-600'>To Account:</span><span class='font-medium'>{}</span></div>
                    <div class='flex justify-between'><span class='text-gray-600'>Amount:</span><span class='font-medium text-green-600'>${}</span></div>
                    <div class='flex justify-between'><span class='text-gray-600'>Date:</span><span class='font-medium'>{}</span></div>
                </div>
                <button type='button' hx-post='/transfer/dismiss' hx-target='#transfer-form' hx-swap='outerHTML'
                    class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Continue</button>
            </div>
        </div>"#,
        escape_html(&receipt.source_account_id),
        escape_html(&receipt.destination_account_id),
        escape_html(&format_balance(&receipt.amount)),
        receipt.completed_at.format("%b %d, %Y, %I:%M %p")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn receipt() -> TransferReceipt {
        TransferReceipt {
            source_account_id: "111".to_string(),
            destination_account_id: "222".to_string(),
            amount: "1500.5".to_string(),
            completed_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_success_modal_rows() {
        let html = render_success_modal(&receipt());
        assert!(html.contains("Transfer Successful"));
        assert!(html.contains("Your fund transfer has been completed successfully!"));
        assert!(html.contains("$1,500.5"));
        assert!(html.contains("Jun 01, 2025, 09:30 AM"));
        assert!(html.contains("Continue"));
    }

    #[test]
    fn test_transfer_form_without_receipt_has_no_modal() {
        let mut state: FormState<TransferDraft> = FormState::default();
        let html = render_transfer_form(&mut state, Instant::now());
        assert!(!html.contains("transfer-modal"));
        assert!(html.contains("Processing Transfer..."));

        state.set_output(receipt());
        assert!(render_transfer_form(&mut state, Instant::now()).contains("transfer-modal"));
    }
}
