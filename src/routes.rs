//! Route definitions and router setup
//!
//! Configures all API routes and middleware.

mod health;
mod hello_world;

use crate::config::Settings;
use crate::error::not_found_error;
use crate::middleware;
use crate::state::SharedState;
use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower::{limit::GlobalConcurrencyLimitLayer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit, ServiceBuilderExt,
};
use tracing::Level;

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState, settings: &Settings) -> Router {
    let routes = Router::new()
        // Service identity
        .route("/", get(hello_world::root))

        // Health check
        .route("/api/health", get(health::health_check))

        // Hello world routes
        .route(
            "/api/hello-world",
            get(hello_world::get_hello_world).post(hello_world::create_hello_world),
        )
        .route("/api/hello-world/messages", get(hello_world::list_messages))
        .route("/api/hello-world/messages/{id}", get(hello_world::get_message))

        .fallback(route_not_found)
        .with_state(state);

    with_middleware(routes, settings)
}

/// Wrap a router in the request middleware chain.
///
/// Layers run outermost first: panic recovery, request id, client IP,
/// no-cache headers, admission cap, timeout, CORS, access log.
pub fn with_middleware(router: Router, settings: &Settings) -> Router {
    // Build tracing/logging layer
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(middleware::access_log_span)
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    // Build middleware stack
    let stack = ServiceBuilder::new()
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .set_x_request_id(MakeRequestUuid)
        .propagate_x_request_id()
        .layer(axum::middleware::from_fn(middleware::real_ip))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(middleware::NO_CACHE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static(middleware::EXPIRES_EPOCH),
        ))
        .layer(HandleErrorLayer::new(middleware::handle_middleware_error))
        // Router::layer wraps each route separately; the semaphore must be shared
        .layer(GlobalConcurrencyLimitLayer::new(settings.server.max_in_flight))
        .timeout(settings.server.request_timeout)
        .layer(build_cors_layer())
        .layer(axum::middleware::from_fn(middleware::short_circuit_options))
        .layer(trace_layer);

    router.layer(stack)
}

/// Build CORS layer: any origin, fixed methods and headers
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Fallback for unmapped paths
async fn route_not_found() -> crate::error::AppError {
    not_found_error("Resource not found")
}
