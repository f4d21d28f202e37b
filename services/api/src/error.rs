//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and how each
//! kind of error is rendered as an HTTP response.

use crate::config::ConfigError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use giftlink_core::{PortError, ValidationError};
use serde_json::json;
use tracing::error;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the core service port.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration Error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Caller-supplied data was rejected before reaching the store.
    #[error("{0}")]
    Validation(String),

    /// Missing, unknown or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.0)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl ApiError {
    /// The status code and client-facing message for this error.
    ///
    /// Server-side faults never leak their cause; it only reaches the log.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Port(PortError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Port(PortError::Conflict(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Port(PortError::Invalid(msg)) | ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApiError::Port(PortError::Unauthorized) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_errors_map_to_statuses() {
        let cases: [(ApiError, StatusCode); 7] = [
            (PortError::NotFound("Gift not found".into()).into(), StatusCode::NOT_FOUND),
            (PortError::Conflict("taken".into()).into(), StatusCode::BAD_REQUEST),
            (PortError::Invalid("bad".into()).into(), StatusCode::BAD_REQUEST),
            (PortError::Unauthorized.into(), StatusCode::UNAUTHORIZED),
            (
                PortError::Unexpected("boom".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ApiError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status_and_message().0, expected, "{:?}", err);
        }
    }

    #[test]
    fn internal_errors_hide_their_cause() {
        let (_, message) =
            ApiError::Port(PortError::Unexpected("connection reset".into())).status_and_message();
        assert_eq!(message, "Internal Server Error");
    }

    #[test]
    fn client_errors_keep_their_message() {
        let err = ApiError::Port(PortError::Conflict("Email id already exists".into()));
        let (_, message) = err.status_and_message();
        assert_eq!(message, "Email id already exists");
    }
}
