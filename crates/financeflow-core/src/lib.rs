//! Client state and backend workflows for the FinanceFlow front end
//!
//! Three independent forms (create account, account lookup, funds transfer)
//! are validated locally, submitted through a [`Transport`] and folded back
//! into their [`FormState`] and the shared [`AccountStore`].

pub mod error;
pub mod form;
pub mod format;
pub mod notification;
pub mod selector;
pub mod store;
pub mod transport;
pub mod types;
pub mod validation;
pub mod workflow;

pub use error::{ClientError, ClientResult, DefaultErrorLogger, ErrorCode, ErrorContext, ErrorLogger, ErrorSeverity};
pub use form::{
    lock_form, shared_form, Draft, FormPhase, FormState, LookupDraft, NewAccountDraft, SharedForm, TransferDraft,
};
pub use format::format_balance;
pub use notification::{Notification, NotificationSlot};
pub use selector::{filter_candidates, Selector};
pub use store::AccountStore;
pub use transport::{ApiResponse, HttpTransport, Method, Transport};
pub use types::{AccountDetail, AccountRef, Field, FormKind, NotificationKind, SyncState, TransferReceipt};
pub use validation::FieldErrors;
pub use workflow::{Submission, Workflows};
