//! Form state containers
//!
//! A [`FormState`] holds one form's draft, its field error set, the
//! submission phase, a notification slot and the last successful result.

use crate::error::{ClientError, ClientResult};
use crate::notification::NotificationSlot;
use crate::types::{AccountDetail, AccountRef, Field, FormKind, TransferReceipt};
use crate::validation::{self, FieldErrors};
use financeflow_utils::digits_only;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Field values of one form
pub trait Draft: Default + Clone + Send + 'static {
    /// What a successful submission leaves on display
    type Output: Clone + Send + 'static;

    const KIND: FormKind;
    const FIELDS: &'static [Field];
    /// Drop the displayed output as soon as any field is edited
    const CLEAR_OUTPUT_ON_EDIT: bool = false;

    fn value(&self, field: Field) -> Option<&str>;
    fn value_mut(&mut self, field: Field) -> Option<&mut String>;
    fn validate(&self) -> FieldErrors;
}

/// Create-account form values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewAccountDraft {
    pub account_id: String,
    pub initial_balance: String,
}

impl Draft for NewAccountDraft {
    type Output = AccountRef;

    const KIND: FormKind = FormKind::CreateAccount;
    const FIELDS: &'static [Field] = &[Field::AccountId, Field::InitialBalance];

    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::AccountId => Some(&self.account_id),
            Field::InitialBalance => Some(&self.initial_balance),
            _ => None,
        }
    }

    fn value_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::AccountId => Some(&mut self.account_id),
            Field::InitialBalance => Some(&mut self.initial_balance),
            _ => None,
        }
    }

    fn validate(&self) -> FieldErrors {
        validation::validate_new_account(&self.account_id, &self.initial_balance)
    }
}

/// Account lookup form values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupDraft {
    pub account_id: String,
}

impl Draft for LookupDraft {
    type Output = AccountDetail;

    const KIND: FormKind = FormKind::Lookup;
    const FIELDS: &'static [Field] = &[Field::AccountId];
    const CLEAR_OUTPUT_ON_EDIT: bool = true;

    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::AccountId => Some(&self.account_id),
            _ => None,
        }
    }

    fn value_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::AccountId => Some(&mut self.account_id),
            _ => None,
        }
    }

    fn validate(&self) -> FieldErrors {
        validation::validate_lookup(&self.account_id)
    }
}

/// Transfer form values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferDraft {
    pub source_account_id: String,
    pub destination_account_id: String,
    pub amount: String,
}

impl Draft for TransferDraft {
    type Output = TransferReceipt;

    const KIND: FormKind = FormKind::Transfer;
    const FIELDS: &'static [Field] = &[Field::SourceAccountId, Field::DestinationAccountId, Field::Amount];

    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::SourceAccountId => Some(&self.source_account_id),
            Field::DestinationAccountId => Some(&self.destination_account_id),
            Field::Amount => Some(&self.amount),
            _ => None,
        }
    }

    fn value_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::SourceAccountId => Some(&mut self.source_account_id),
            Field::DestinationAccountId => Some(&mut self.destination_account_id),
            Field::Amount => Some(&mut self.amount),
            _ => None,
        }
    }

    fn validate(&self) -> FieldErrors {
        validation::validate_transfer(&self.source_account_id, &self.destination_account_id, &self.amount)
    }
}

/// Submission phase of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
}

/// Result of validating a form for submission
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<D> {
    /// Errors were found; the form is back to idle
    Invalid(FieldErrors),
    /// The draft is valid; the form is now submitting this snapshot
    Ready(D),
}

#[derive(Debug, Clone)]
pub struct FormState<D: Draft> {
    draft: D,
    errors: FieldErrors,
    phase: FormPhase,
    notification: NotificationSlot,
    output: Option<D::Output>,
}

impl<D: Draft> Default for FormState<D> {
    fn default() -> Self {
        Self::new(crate::notification::DEFAULT_TTL)
    }
}

impl<D: Draft> FormState<D> {
    pub fn new(notification_ttl: Duration) -> Self {
        Self {
            draft: D::default(),
            errors: FieldErrors::new(),
            phase: FormPhase::Idle,
            notification: NotificationSlot::new(notification_ttl),
            output: None,
        }
    }

    pub fn kind(&self) -> FormKind {
        D::KIND
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn notification(&mut self) -> &mut NotificationSlot {
        &mut self.notification
    }

    pub fn output(&self) -> Option<&D::Output> {
        self.output.as_ref()
    }

    /// Apply one edit to a field.
    ///
    /// Account id fields keep only digits. The edited field's error is cleared;
    /// other fields keep theirs. Returns `false` when the field does not belong
    /// to this form.
    pub fn set_field(&mut self, field: Field, raw: &str) -> bool {
        let Some(slot) = self.draft.value_mut(field) else {
            return false;
        };
        *slot = if field.is_account_id() {
            digits_only(raw)
        } else {
            raw.to_string()
        };
        self.errors.clear(field);
        if D::CLEAR_OUTPUT_ON_EDIT {
            self.output = None;
        }
        true
    }

    /// Validate for submission, refusing while a submission is outstanding
    pub fn begin_submit(&mut self) -> ClientResult<Validated<D>> {
        if self.phase == FormPhase::Submitting {
            return Err(ClientError::SubmissionInFlight { form: D::KIND });
        }

        self.phase = FormPhase::Validating;
        self.errors = self.draft.validate();
        if !self.errors.is_empty() {
            self.phase = FormPhase::Idle;
            return Ok(Validated::Invalid(self.errors.clone()));
        }

        self.phase = FormPhase::Submitting;
        Ok(Validated::Ready(self.draft.clone()))
    }

    /// Return to idle; called on every submission exit path
    pub fn finish_submit(&mut self) {
        self.phase = FormPhase::Idle;
    }

    /// Replace the error set with errors found after validation passed
    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// Clear every field and error
    pub fn reset_draft(&mut self) {
        self.draft = D::default();
        self.errors = FieldErrors::new();
    }

    pub fn set_output(&mut self, output: D::Output) {
        self.output = Some(output);
    }

    pub fn clear_output(&mut self) {
        self.output = None;
    }
}

/// A form shared between request handlers
pub type SharedForm<D> = Arc<Mutex<FormState<D>>>;

/// Create a shared form
pub fn shared_form<D: Draft>(notification_ttl: Duration) -> SharedForm<D> {
    Arc::new(Mutex::new(FormState::new(notification_ttl)))
}

/// Lock a shared form. The state stays usable after a panicking holder.
pub fn lock_form<D: Draft>(form: &SharedForm<D>) -> MutexGuard<'_, FormState<D>> {
    form.lock().unwrap_or_else(PoisonError::into_inner)
}
