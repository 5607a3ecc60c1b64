//! Data models and DTOs (Data Transfer Objects)
//!
//! Contains the response envelopes shared by every endpoint and the
//! hello-world request/response structures.

pub mod hello_world;

// Re-export commonly used types
pub use hello_world::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope status for successful responses
pub const STATUS_SUCCESS: &str = "success";

/// Envelope status for failed responses
pub const STATUS_ERROR: &str = "error";

/// Minimal envelope: status, message and when it was produced
#[derive(Debug, Serialize, Deserialize)]
pub struct BaseResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl BaseResponse {
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Generic success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub status: &'static str,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: message.into(),
            timestamp: Utc::now(),
            data: Some(data),
        }
    }

    #[allow(dead_code)]
    pub fn message_only(message: impl Into<String>) -> SuccessResponse<()> {
        SuccessResponse {
            status: STATUS_SUCCESS,
            message: message.into(),
            timestamp: Utc::now(),
            data: None,
        }
    }
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR,
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
