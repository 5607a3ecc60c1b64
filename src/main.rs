//! Starter API - Rust + Axum starter project
//!
//! Exposes a health check and a minimal hello-world message resource backed
//! by PostgreSQL. When the database cannot be reached at startup the server
//! keeps running without persistence: the health check and static greeting
//! still work, storage-backed endpoints report a database error.

mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod service;
mod state;

use crate::config::{AuthConfig, Settings};
use crate::db::Database;
use crate::routes::create_router;
use crate::state::AppState;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    info!("🚀 Starting Starter API...");

    // Load configuration
    let settings = Settings::load();
    info!("📋 Configuration loaded successfully");

    if settings.auth.jwt_secret == AuthConfig::default().jwt_secret {
        warn!("⚠️  JWT_SECRET not set, using default (INSECURE - set in production!)");
    }

    // Connect to the database; run without persistence if that fails
    let database = match Database::connect(&settings.database).await {
        Ok(db) => {
            if let Err(e) = db.ensure_schema().await {
                warn!("⚠️  Warning creating tables: {}", e);
            }
            Some(db)
        }
        Err(e) => {
            warn!("⚠️  Database connection failed: {}", e);
            warn!("⚠️  Running without database...");
            None
        }
    };

    let state = Arc::new(AppState::new(database.clone()));

    // Build the router
    let app = create_router(state, &settings);

    let addr = settings.addr();

    // Create TCP listener; failing to bind is fatal
    let listener = TcpListener::bind(addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📚 API Endpoints:");
    info!("   GET  /                              - Service information");
    info!("   GET  /api/health                    - Health check");
    info!("   GET  /api/hello-world               - Static greeting");
    info!("   POST /api/hello-world               - Create a message");
    info!("   GET  /api/hello-world/messages      - List messages");
    info!("   GET  /api/hello-world/messages/{{id}} - Get a message by id");
    info!("");

    // Signal the grace-period timer once shutdown begins
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(());
    })
    .into_future();

    let grace = settings.server.shutdown_grace;
    let grace_elapsed = async move {
        match shutdown_rx.await {
            Ok(()) => tokio::time::sleep(grace).await,
            // Server stopped without a signal; let it report its own result
            Err(_) => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = server => result?,
        _ = grace_elapsed => {
            warn!("⏳ Shutdown grace period of {:?} elapsed, abandoning in-flight requests", grace);
        }
    }

    db::close(database.as_ref());

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,starter_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}
