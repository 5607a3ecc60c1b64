//! Cross-cutting request middleware
//!
//! Panic recovery, client IP resolution, `OPTIONS` short-circuiting,
//! error mapping for the tower layers and the access-log span.

use crate::error::AppError;
use crate::models::ErrorResponse;
use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::{HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use std::any::Any;
use std::net::{IpAddr, SocketAddr};
use tracing::{error, warn, Span};

/// Headers consulted for the originating client address, in priority order
const CLIENT_IP_HEADERS: [&str; 2] = ["true-client-ip", "x-real-ip"];
const FORWARDED_FOR: &str = "x-forwarded-for";

/// `Cache-Control` value sent on every response
pub const NO_CACHE: &str = "no-cache, no-store, no-transform, must-revalidate, private, max-age=0";

/// `Expires` value sent on every response
pub const EXPIRES_EPOCH: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Resolved address of the client that issued the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

/// Convert a caught panic into the generic internal-fault envelope
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };

    error!(panic = %detail, "💥 Recovered from panic while handling request");
    AppError::Internal("Internal Server Error".to_string()).into_response()
}

/// Resolve the client address from proxy headers, falling back to the peer address
pub async fn real_ip(mut request: Request, next: Next) -> Response {
    let ip = forwarded_ip(request.headers()).or_else(|| {
        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
    });

    if let Some(ip) = ip {
        request.extensions_mut().insert(ClientIp(ip));
    }

    next.run(request).await
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    CLIENT_IP_HEADERS
        .iter()
        .find_map(|name| header(*name).and_then(|v| v.trim().parse().ok()))
        .or_else(|| {
            header(FORWARDED_FOR)
                .and_then(|v| v.split(',').next())
                .and_then(|first| first.trim().parse().ok())
        })
}

/// Answer every `OPTIONS` request with an empty 200
pub async fn short_circuit_options(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    next.run(request).await
}

/// Map failures raised by the timeout and admission layers to envelopes
pub async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("⏱️  Request exceeded the configured timeout");
        return (
            StatusCode::GATEWAY_TIMEOUT,
            Json(ErrorResponse::new("timeout", "Request timed out")),
        )
            .into_response();
    }

    AppError::Internal(format!("Unhandled middleware error: {}", err)).into_response()
}

/// Span wrapping each request in the access log
pub fn access_log_span(request: &axum::http::Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    let client_ip = request
        .extensions()
        .get::<ClientIp>()
        .map(|ClientIp(ip)| ip.to_string())
        .unwrap_or_else(|| "-".to_string());

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        client_ip = %client_ip,
    )
}
