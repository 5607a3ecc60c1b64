//! Hello-world domain service
//!
//! The service validates input and persists or reads messages. Handlers only
//! see the [`HelloWorldService`] capability; `postgres` backs it with SQL and
//! `memory` with a process-local store.

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[cfg(test)]
pub use memory::MemoryHelloWorldService;
pub use postgres::PgHelloWorldService;

use crate::error::{validation_error, AppError};
use crate::models::{HelloWorldMessage, HelloWorldRequest, HelloWorldResponse};
use async_trait::async_trait;
use validator::Validate;

/// Operations available on hello-world messages
#[async_trait]
pub trait HelloWorldService: Send + Sync {
    /// Static greeting; never touches storage
    fn get_static(&self) -> HelloWorldResponse {
        HelloWorldResponse::now()
    }

    /// Store a greeting for `request.name` and return the persisted row
    async fn create(&self, request: HelloWorldRequest) -> Result<HelloWorldMessage, AppError>;

    /// All messages, most recent first
    async fn list(&self) -> Result<Vec<HelloWorldMessage>, AppError>;

    /// One message by id
    async fn get_by_id(&self, id: i32) -> Result<HelloWorldMessage, AppError>;
}

/// Reject requests that fail field validation
pub(crate) fn validate_request(request: &HelloWorldRequest) -> Result<(), AppError> {
    request.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Validation failed".to_string());
        validation_error(message)
    })
}

pub(crate) fn message_not_found() -> AppError {
    AppError::NotFound("hello world message not found".to_string())
}
