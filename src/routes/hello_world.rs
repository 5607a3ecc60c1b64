//! Hello-world route handlers
//!
//! Decode requests, call the service and wrap the outcome in an envelope.

use crate::error::{not_found_error, validation_error, ApiResult, AppError};
use crate::models::{
    BaseResponse, HelloWorldMessage, HelloWorldRequest, HelloWorldResponse, SuccessResponse,
    STATUS_SUCCESS,
};
use crate::state::SharedState;
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::debug;

/// Service identity
pub async fn root() -> Json<BaseResponse> {
    Json(BaseResponse::new(STATUS_SUCCESS, "Rust + Axum Starter Project API"))
}

/// Static greeting
pub async fn get_hello_world(
    State(state): State<SharedState>,
) -> Json<SuccessResponse<HelloWorldResponse>> {
    Json(SuccessResponse::with_data(
        "Hello World message retrieved successfully",
        state.hello_world.get_static(),
    ))
}

/// Create a new message.
///
/// The body is decoded as JSON whatever its `Content-Type` says.
pub async fn create_hello_world(
    State(state): State<SharedState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<(StatusCode, Json<SuccessResponse<HelloWorldMessage>>)> {
    let request = body
        .map_err(|rejection| rejection.body_text())
        .and_then(|bytes| {
            serde_json::from_slice::<HelloWorldRequest>(&bytes).map_err(|e| e.to_string())
        })
        .map_err(|reason| {
            debug!("Rejected hello world body: {}", reason);
            validation_error("Invalid request body")
        })?;

    debug!("Creating hello world message for: {:?}", request.name);

    let message = state
        .hello_world
        .create(request)
        .await
        .map_err(|e| e.public("Failed to create hello world message"))?;

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::with_data(
            "Hello World message created successfully",
            message,
        )),
    ))
}

/// List all messages, most recent first
pub async fn list_messages(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<Vec<HelloWorldMessage>>>> {
    let messages = state
        .hello_world
        .list()
        .await
        .map_err(|e| e.public("Failed to retrieve hello world messages"))?;

    Ok(Json(SuccessResponse::with_data(
        "Hello World messages retrieved successfully",
        messages,
    )))
}

/// Fetch one message by numeric id
pub async fn get_message(
    State(state): State<SharedState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<SuccessResponse<HelloWorldMessage>>> {
    let id: i64 = id
        .ok()
        .and_then(|Path(raw)| raw.parse().ok())
        .ok_or_else(|| validation_error("Invalid ID format"))?;

    // Ids are SERIAL, so nothing is stored outside the i32 range
    let id = i32::try_from(id).map_err(|_| not_found_error("Hello World message not found"))?;

    let message = state.hello_world.get_by_id(id).await.map_err(|e| match e {
        AppError::NotFound(_) => not_found_error("Hello World message not found"),
        other => other.public("Failed to retrieve hello world message"),
    })?;

    Ok(Json(SuccessResponse::with_data(
        "Hello World message retrieved successfully",
        message,
    )))
}
