//! Hello-world models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a new hello-world message
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct HelloWorldRequest {
    // A missing field becomes an empty name and is rejected by validation.
    // Whitespace-only names are accepted.
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

#[cfg(test)]
impl HelloWorldRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A persisted hello-world message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloWorldMessage {
    pub id: i32,
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HelloWorldMessage {
    /// The greeting stored for `name`
    pub fn greeting(name: &str) -> String {
        format!("Hello, {}!", name)
    }
}

impl From<&tokio_postgres::Row> for HelloWorldMessage {
    fn from(row: &tokio_postgres::Row) -> Self {
        Self {
            id: row.get("id"),
            name: row.get("name"),
            message: row.get("message"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

/// Static greeting payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloWorldResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HelloWorldResponse {
    pub fn now() -> Self {
        Self {
            message: "Hello, World!".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
