//! Health check route handler

use crate::models::BaseResponse;
use crate::state::SharedState;
use axum::extract::State;
use axum::Json;
use tracing::warn;

/// Report liveness, degrading to `unhealthy` when the database cannot be pinged.
///
/// Always answers 200. A server running without a database is healthy.
pub async fn health_check(State(state): State<SharedState>) -> Json<BaseResponse> {
    let (status, message) = match &state.db {
        Some(db) => match db.ping().await {
            Ok(()) => ("healthy", "Application is running"),
            Err(e) => {
                warn!("Health check ping failed: {}", e);
                ("unhealthy", "Database connection failed")
            }
        },
        None => ("healthy", "Application is running"),
    };

    Json(BaseResponse::new(status, message))
}
