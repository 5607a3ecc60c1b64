//! SQL query constants
//!
//! Contains all SQL queries used by the application.

/// Connectivity probe
pub const PING: &str = "SELECT 1";

/// Create the messages table if it does not exist yet
pub const CREATE_MESSAGES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS hello_world_messages (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        message TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Index backing the most-recent-first listing
pub const CREATE_MESSAGES_CREATED_AT_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_hello_world_messages_created_at
    ON hello_world_messages (created_at DESC)
"#;

/// Insert a message, returning the stored row
pub const INSERT_MESSAGE: &str = r#"
    INSERT INTO hello_world_messages (name, message, created_at, updated_at)
    VALUES ($1, $2, $3, $4)
    RETURNING id, name, message, created_at, updated_at
"#;

/// List every message, most recent first
pub const LIST_MESSAGES: &str = r#"
    SELECT id, name, message, created_at, updated_at
    FROM hello_world_messages
    ORDER BY created_at DESC, id DESC
"#;

/// Fetch one message by id
pub const GET_MESSAGE_BY_ID: &str = r#"
    SELECT id, name, message, created_at, updated_at
    FROM hello_world_messages
    WHERE id = $1
"#;
