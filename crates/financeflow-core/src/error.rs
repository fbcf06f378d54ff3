//! Error types for financeflow-core
//!
//! Field-level validation failures are not errors in this sense: they live in
//! [`crate::validation::FieldErrors`] and never leave the form. The types here
//! cover operation-level failures (backend and network) and the per-form
//! submission guard.

use crate::types::FormKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A submission of the same form is still outstanding
    SubmissionInFlight,
    /// Backend answered with a non-2xx status
    BackendRejected,
    /// No response reached the client
    NetworkUnavailable,
    /// Backend answered 2xx with a body that could not be interpreted
    InvalidResponse,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::SubmissionInFlight => write!(f, "SUBMISSION_IN_FLIGHT"),
            ErrorCode::BackendRejected => write!(f, "BACKEND_REJECTED"),
            ErrorCode::NetworkUnavailable => write!(f, "NETWORK_UNAVAILABLE"),
            ErrorCode::InvalidResponse => write!(f, "INVALID_RESPONSE"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for logs and JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

/// Main error type for financeflow-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("A {form} submission is already in progress")]
    SubmissionInFlight { form: FormKind },

    #[error("Backend rejected the request with status {status}: {message}")]
    BackendRejected { status: u16, message: String },

    #[error("Network error: {message}")]
    NetworkUnavailable { message: String },

    #[error("Invalid backend response: {message}")]
    InvalidResponse { message: String },
}

impl ClientError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::SubmissionInFlight { .. } => ErrorCode::SubmissionInFlight,
            ClientError::BackendRejected { .. } => ErrorCode::BackendRejected,
            ClientError::NetworkUnavailable { .. } => ErrorCode::NetworkUnavailable,
            ClientError::InvalidResponse { .. } => ErrorCode::InvalidResponse,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ClientError::SubmissionInFlight { .. } => ErrorSeverity::Info,
            ClientError::BackendRejected { status, .. } if *status < 500 => ErrorSeverity::Warning,
            ClientError::BackendRejected { .. } => ErrorSeverity::Error,
            ClientError::NetworkUnavailable { .. } => ErrorSeverity::Error,
            ClientError::InvalidResponse { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            ClientError::SubmissionInFlight { .. } => {
                details = details.with_suggestion(
                    "Wait for the outstanding request to finish before submitting again.".to_string()
                );
            }
            ClientError::BackendRejected { status, .. } => {
                details = details.with_detail(serde_json::json!({ "status": status }));
            }
            ClientError::NetworkUnavailable { .. } => {
                details = details.with_suggestion(
                    "Check that the ledger backend is running and backend.base_url is correct.".to_string()
                );
            }
            ClientError::InvalidResponse { .. } => {
                details = details.with_suggestion(
                    "The backend must answer with a JSON body containing a balance field.".to_string()
                );
            }
        }

        details
    }
}

/// Result type with ClientError
pub type ClientResult<T> = Result<T, ClientError>;

/// Error context for reporting
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Form the operation belongs to
    pub form: FormKind,
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(form: FormKind, operation: &str) -> Self {
        Self {
            form,
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    /// Log an operation failure
    fn log_error(&self, error: &ClientError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &ClientError, context: &ErrorContext) {
        let level = match error.severity() {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error => log::Level::Error,
        };
        log::log!(
            target: "financeflow::error",
            level,
            "{} - Form: {} - Operation: {} - Data: {}",
            error.to_details(),
            context.form,
            context.operation,
            context.data
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::SubmissionInFlight.to_string(), "SUBMISSION_IN_FLIGHT");
        assert_eq!(ErrorCode::BackendRejected.to_string(), "BACKEND_REJECTED");
        assert_eq!(ErrorCode::NetworkUnavailable.to_string(), "NETWORK_UNAVAILABLE");
    }

    #[test]
    fn test_client_error_severity() {
        let error = ClientError::BackendRejected { status: 400, message: "bad".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Warning);

        let error = ClientError::BackendRejected { status: 503, message: "down".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Error);

        let error = ClientError::SubmissionInFlight { form: FormKind::Transfer };
        assert_eq!(error.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_busy_message_names_form() {
        let error = ClientError::SubmissionInFlight { form: FormKind::CreateAccount };
        assert_eq!(error.to_string(), "A create-account submission is already in progress");
        assert_eq!(error.code(), ErrorCode::SubmissionInFlight);
    }

    #[test]
    fn test_rejected_details_carry_status() {
        let details = ClientError::BackendRejected {
            status: 404,
            message: "account not found".to_string(),
        }
        .to_details();

        assert_eq!(details.code, ErrorCode::BackendRejected);
        assert_eq!(details.details, Some(serde_json::json!({ "status": 404 })));
        assert!(details.message.contains("account not found"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new(FormKind::Lookup, "fetch_account")
            .with_data("account_id", serde_json::json!(123));

        assert_eq!(context.operation, "fetch_account");
        assert_eq!(context.data["account_id"], 123);
    }
}
