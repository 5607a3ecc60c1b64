//! Application state management
//!
//! Contains shared state accessible across all handlers.

use crate::db::Database;
use crate::service::{HelloWorldService, PgHelloWorldService};
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Database handle; `None` when running without persistence
    pub db: Option<Database>,

    /// Hello-world message operations
    pub hello_world: Arc<dyn HelloWorldService>,
}

impl AppState {
    /// State backed by PostgreSQL (or degraded, when `db` is `None`)
    pub fn new(db: Option<Database>) -> Self {
        let pool = db.as_ref().map(|d| d.pool().clone());
        let hello_world: Arc<dyn HelloWorldService> = Arc::new(PgHelloWorldService::new(pool));

        Self { db, hello_world }
    }

    /// State with an explicit service implementation
    #[cfg(test)]
    pub fn with_service(db: Option<Database>, hello_world: Arc<dyn HelloWorldService>) -> Self {
        Self { db, hello_world }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
