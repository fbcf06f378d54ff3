//! Error types for financeflow-web

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use financeflow_core::ClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Client(ClientError::SubmissionInFlight { .. }) => StatusCode::CONFLICT,
            ApiError::Client(ClientError::BackendRejected { .. } | ClientError::InvalidResponse { .. }) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::Client(ClientError::NetworkUnavailable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        log::debug!("Request rejected with {}: {}", status, self);
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use financeflow_core::FormKind;

    #[test]
    fn test_status_mapping() {
        let busy = ApiError::from(ClientError::SubmissionInFlight { form: FormKind::Transfer });
        assert_eq!(busy.status(), StatusCode::CONFLICT);
        assert_eq!(busy.to_string(), "A transfer submission is already in progress");

        let missing = ApiError::NotFound { resource: "form settings".to_string() };
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
