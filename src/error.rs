//! Error handling module
//!
//! Provides the closed set of failures the API can report and their mapping
//! onto HTTP status codes and the error envelope.

use crate::models::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

/// Application-wide error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Input has the wrong shape (empty name, malformed id or body)
    #[error("Validation error: {0}")]
    Validation(String),

    /// No row matches the requested identity
    #[error("Not found: {0}")]
    NotFound(String),

    /// No storage backend is configured or reachable
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    /// A query, insert or row decode failed
    #[error("Database error: {0}")]
    Storage(String),

    /// Anything unanticipated, including recovered panics
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio_postgres::Error> for AppError {
    fn from(e: tokio_postgres::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<deadpool_postgres::PoolError> for AppError {
    fn from(e: deadpool_postgres::PoolError) -> Self {
        AppError::Storage(format!("Database pool error: {}", e))
    }
}

impl AppError {
    /// Status code and envelope category for this failure
    pub fn status_and_category(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Unavailable(_) | AppError::Storage(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Message carried by the variant
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Unavailable(msg)
            | AppError::Storage(msg)
            | AppError::Internal(msg) => msg,
        }
    }

    /// Swap the detail of a storage-side failure for a client-facing message.
    ///
    /// The original detail goes to the log. Validation, not-found and internal
    /// errors keep their message.
    pub fn public(self, message: &str) -> Self {
        match self {
            AppError::Unavailable(detail) => {
                error!("{}: {}", message, detail);
                AppError::Unavailable(message.to_string())
            }
            AppError::Storage(detail) => {
                error!("{}: {}", message, detail);
                AppError::Storage(message.to_string())
            }
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, category) = self.status_and_category();

        if let AppError::Internal(msg) = &self {
            error!("Internal error: {}", msg);
        }

        let body = Json(ErrorResponse::new(category, self.message()));

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper function to create a validation error
pub fn validation_error(msg: impl Into<String>) -> AppError {
    AppError::Validation(msg.into())
}

/// Helper function to create a not found error
pub fn not_found_error(msg: impl Into<String>) -> AppError {
    AppError::NotFound(msg.into())
}

/// Helper function to create an availability error
pub fn unavailable_error() -> AppError {
    AppError::Unavailable("database connection is not available".to_string())
}
