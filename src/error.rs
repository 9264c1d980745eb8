//! Error types for the paste server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::backend::BackendError;

// == Store Error Enum ==
/// Unified error type for the paste server.
///
/// Optimistic-sweep conflicts and cooldown skips are not errors; the
/// coordinator reports those as a plain `false`.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Transient backend failure; propagates uncaught from store/sweep calls
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// A stored row failed to (de)serialize
    #[error("Malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Record not found (or expired)
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Overwrite rejected because the record is password-protected
    #[error("Password mismatch for record: {0}")]
    PasswordMismatch(String),

    /// Write was not acknowledged by the backend
    #[error("Write rejected for record: {0}")]
    WriteRejected(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::Malformed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::PasswordMismatch(_) => StatusCode::FORBIDDEN,
            StoreError::WriteRejected(_) => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the paste server.
pub type Result<T> = std::result::Result<T, StoreError>;
