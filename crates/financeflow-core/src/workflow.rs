//! Submission workflows
//!
//! Each workflow validates its form, performs at most one backend call and
//! folds the outcome back into the form and the account store. A form's
//! busy phase is released by [`SubmitGuard`] on every exit path, including
//! when the submitting future is dropped mid-request.

use crate::error::{ClientError, ClientResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::form::{lock_form, Draft, LookupDraft, NewAccountDraft, SharedForm, TransferDraft, Validated};
use crate::store::AccountStore;
use crate::transport::{message_from_body, ApiResponse, Transport};
use crate::types::{AccountDetail, AccountRef, Field, FormKind, NotificationKind, TransferReceipt};
use crate::validation::{FieldErrors, MSG_ACCOUNT_ID_TOO_LARGE};
use chrono::Utc;
use financeflow_utils::capitalize_first;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;

pub const MSG_CREATE_FAILED: &str = "Failed to add account";
pub const MSG_TRANSFER_FAILED: &str = "Transfer failed. Please try again.";
pub const MSG_LOOKUP_FAILED: &str = "Failed to fetch account details";
pub const MSG_LOOKUP_UNREADABLE: &str = "An error occurred while fetching account details";

/// Outcome of one submit
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    /// Validation failed; nothing was sent
    Invalid(FieldErrors),
    /// The backend accepted the request
    Completed(T),
    /// The request failed; carries the notification shown to the user
    Failed(String),
}

impl<T> Submission<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Submission::Completed(_))
    }
}

/// Returns a form to idle when dropped
struct SubmitGuard<'a, D: Draft> {
    form: &'a SharedForm<D>,
}

impl<D: Draft> Drop for SubmitGuard<'_, D> {
    fn drop(&mut self) {
        lock_form(self.form).finish_submit();
    }
}

enum Started<'a, D: Draft> {
    Invalid(FieldErrors),
    Ready(D, SubmitGuard<'a, D>),
}

fn start<D: Draft>(form: &SharedForm<D>) -> ClientResult<Started<'_, D>> {
    let validated = lock_form(form).begin_submit()?;
    Ok(match validated {
        Validated::Invalid(errors) => Started::Invalid(errors),
        Validated::Ready(draft) => Started::Ready(draft, SubmitGuard { form }),
    })
}

/// Parse a validated account id, reporting overflow on the form
fn parse_account_id<D: Draft>(form: &SharedForm<D>, field: Field, value: &str) -> Result<u64, FieldErrors> {
    value.parse::<u64>().map_err(|_| {
        let mut errors = FieldErrors::new();
        errors.insert(field, MSG_ACCOUNT_ID_TOO_LARGE);
        lock_form(form).set_errors(errors.clone());
        errors
    })
}

/// Display text for a failure: capitalized, or `fallback` when empty
fn failure_text(message: &str, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        capitalize_first(message)
    }
}

/// Account detail from a lookup body: a JSON object, or text holding one
fn parse_account_detail(data: &Value) -> Result<AccountDetail, serde_json::Error> {
    match data {
        Value::String(text) => serde_json::from_str(text),
        other => serde_json::from_value(other.clone()),
    }
}

/// Runs the three workflows against one backend and one account store
#[derive(Clone)]
pub struct Workflows {
    transport: Arc<dyn Transport>,
    store: Arc<AccountStore>,
    logger: Arc<dyn ErrorLogger>,
}

impl Workflows {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<AccountStore>) -> Self {
        Self {
            transport,
            store,
            logger: Arc::new(DefaultErrorLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ErrorLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn store(&self) -> &Arc<AccountStore> {
        &self.store
    }

    fn report(&self, response: &ApiResponse, context: ErrorContext) {
        self.logger.log_error(&response.to_error(), &context);
    }

    /// Submit the create-account form: `POST /accounts`
    pub async fn create_account(&self, form: &SharedForm<NewAccountDraft>) -> ClientResult<Submission<AccountRef>> {
        let (draft, _guard) = match start(form)? {
            Started::Invalid(errors) => return Ok(Submission::Invalid(errors)),
            Started::Ready(draft, guard) => (draft, guard),
        };
        let account_id = match parse_account_id(form, Field::AccountId, &draft.account_id) {
            Ok(id) => id,
            Err(errors) => return Ok(Submission::Invalid(errors)),
        };

        let response = self
            .transport
            .post(
                "/accounts",
                json!({ "account_id": account_id, "initial_balance": draft.initial_balance }),
            )
            .await;
        let now = Instant::now();

        if response.success {
            let account = self.store.record_created(account_id, Utc::now());
            let mut state = lock_form(form);
            state.reset_draft();
            state.set_output(account.clone());
            state.notification().show(
                format!("Account {} created successfully!", draft.account_id),
                NotificationKind::Success,
                now,
            );
            log::info!("Created account {}", account_id);
            return Ok(Submission::Completed(account));
        }

        self.report(
            &response,
            ErrorContext::new(FormKind::CreateAccount, "create_account").with_data("account_id", json!(account_id)),
        );
        let message = failure_text(&message_from_body(&response.data), MSG_CREATE_FAILED);
        lock_form(form)
            .notification()
            .show(message.clone(), NotificationKind::Error, now);
        Ok(Submission::Failed(message))
    }

    /// Submit the lookup form: `GET /accounts/{id}`
    pub async fn lookup(&self, form: &SharedForm<LookupDraft>) -> ClientResult<Submission<AccountDetail>> {
        let (draft, _guard) = match start(form)? {
            Started::Invalid(errors) => return Ok(Submission::Invalid(errors)),
            Started::Ready(draft, guard) => (draft, guard),
        };

        let response = self.transport.get(&format!("/accounts/{}", draft.account_id)).await;
        let now = Instant::now();
        let context = ErrorContext::new(FormKind::Lookup, "fetch_account").with_data("account_id", json!(draft.account_id));

        let message = if response.success {
            match parse_account_detail(&response.data) {
                Ok(detail) => {
                    if let Ok(id) = draft.account_id.parse::<u64>() {
                        self.store.confirm(id);
                    }
                    lock_form(form).set_output(detail.clone());
                    return Ok(Submission::Completed(detail));
                }
                Err(e) => {
                    let error = ClientError::InvalidResponse { message: e.to_string() };
                    self.logger.log_error(&error, &context);
                    MSG_LOOKUP_UNREADABLE.to_string()
                }
            }
        } else {
            self.report(&response, context);
            failure_text(&response.message, MSG_LOOKUP_FAILED)
        };

        let mut state = lock_form(form);
        state.clear_output();
        state.notification().show(message.clone(), NotificationKind::Error, now);
        Ok(Submission::Failed(message))
    }

    /// Submit the transfer form: `POST /transactions`
    pub async fn transfer(&self, form: &SharedForm<TransferDraft>) -> ClientResult<Submission<TransferReceipt>> {
        let (draft, _guard) = match start(form)? {
            Started::Invalid(errors) => return Ok(Submission::Invalid(errors)),
            Started::Ready(draft, guard) => (draft, guard),
        };
        let ids = parse_account_id(form, Field::SourceAccountId, &draft.source_account_id).and_then(|source| {
            parse_account_id(form, Field::DestinationAccountId, &draft.destination_account_id)
                .map(|destination| (source, destination))
        });
        let (source, destination) = match ids {
            Ok(ids) => ids,
            Err(errors) => return Ok(Submission::Invalid(errors)),
        };

        let response = self
            .transport
            .post(
                "/transactions",
                json!({
                    "source_account_id": source,
                    "destination_account_id": destination,
                    "amount": draft.amount,
                }),
            )
            .await;

        if response.success {
            let receipt = TransferReceipt {
                source_account_id: draft.source_account_id,
                destination_account_id: draft.destination_account_id,
                amount: draft.amount,
                completed_at: Utc::now(),
            };
            let mut state = lock_form(form);
            state.reset_draft();
            state.set_output(receipt.clone());
            log::info!("Transferred {} from {} to {}", receipt.amount, source, destination);
            return Ok(Submission::Completed(receipt));
        }

        self.report(
            &response,
            ErrorContext::new(FormKind::Transfer, "transfer")
                .with_data("source_account_id", json!(source))
                .with_data("destination_account_id", json!(destination)),
        );
        let message = failure_text(&response.message, MSG_TRANSFER_FAILED);
        lock_form(form)
            .notification()
            .show(message.clone(), NotificationKind::Error, Instant::now());
        Ok(Submission::Failed(message))
    }
}

// ==================== Tests ====================
