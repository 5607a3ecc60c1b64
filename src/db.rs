//! Database connection management
//!
//! Builds the PostgreSQL connection pool from settings and exposes the
//! probe, schema bootstrap and close operations around it.

pub mod queries;

use crate::config::DatabaseConfig;
use crate::error::AppError;
use deadpool_postgres::{
    Config, Hook, HookError, ManagerConfig, Metrics, Pool, PoolConfig, RecyclingMethod, Runtime,
};
use std::time::Duration;
use tokio_postgres::NoTls;
use tracing::{debug, info};

/// TLS is disabled for every connection this service opens
pub const SSL_MODE: &str = "disable";

/// How often idle connections are checked against the idle and lifetime limits
const IDLE_REAP_INTERVAL: Duration = Duration::from_secs(30);

/// Pooled PostgreSQL connection set
#[derive(Clone)]
pub struct Database {
    pool: Pool,
}

impl Database {
    /// Open the pool and verify connectivity with a probe query
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let db = Self::lazy(config)?;

        db.ping().await.map_err(|e| {
            AppError::Unavailable(format!(
                "failed to ping database ({}): {}",
                Self::descriptor(config, true),
                e.message()
            ))
        })?;

        info!("✅ Database connected successfully");
        Ok(db)
    }

    /// Create the pool without touching the network.
    ///
    /// Connections are opened on first use, so a bad endpoint only surfaces
    /// on the first query or ping. Connections past `max_lifetime` are
    /// replaced on checkout, and a background task closes idle connections
    /// beyond `max_idle`.
    pub fn lazy(config: &DatabaseConfig) -> Result<Self, AppError> {
        let mut cfg = Config::new();
        cfg.host = Some(config.host.clone());
        cfg.port = Some(config.port);
        cfg.user = Some(config.user.clone());
        cfg.password = Some(config.password.clone());
        cfg.dbname = Some(config.database.clone());
        cfg.ssl_mode = Some(deadpool_postgres::SslMode::Disable);
        cfg.connect_timeout = Some(config.connect_timeout);
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        cfg.pool = Some(PoolConfig::new(config.max_pool_size));

        let max_lifetime = config.max_lifetime;
        let pool = cfg
            .builder(NoTls)
            .map_err(|e| AppError::Unavailable(format!("Failed to create pool: {}", e)))?
            .runtime(Runtime::Tokio1)
            .pre_recycle(Hook::sync_fn(move |_, metrics| {
                if expired(metrics, max_lifetime) {
                    Err(HookError::Message("connection exceeded its maximum lifetime".into()))
                } else {
                    Ok(())
                }
            }))
            .build()
            .map_err(|e| AppError::Unavailable(format!("Failed to create pool: {}", e)))?;

        spawn_idle_reaper(&pool, config.max_idle, max_lifetime);

        debug!("Connection pool created for {}", Self::descriptor(config, true));
        Ok(Self { pool })
    }

    /// Key/value connection descriptor, optionally with the password masked
    pub fn descriptor(config: &DatabaseConfig, mask_password: bool) -> String {
        let password = if mask_password { "********" } else { config.password.as_str() };
        format!(
            "host={} port={} user={} password={} dbname={} sslmode={}",
            config.host, config.port, config.user, password, config.database, SSL_MODE
        )
    }

    /// Run the probe query on a pooled client
    pub async fn ping(&self) -> Result<(), AppError> {
        let client = self.pool.get().await?;
        client.query_one(queries::PING, &[]).await?;
        Ok(())
    }

    /// Create the messages table and its index if missing
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        let client = self.pool.get().await?;
        client.batch_execute(queries::CREATE_MESSAGES_TABLE).await?;
        client.batch_execute(queries::CREATE_MESSAGES_CREATED_AT_INDEX).await?;

        info!("✅ Database tables initialized");
        Ok(())
    }

    /// Underlying pool, for services that run their own queries
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Close the pool. Safe to call repeatedly.
    pub fn close(&self) {
        if self.pool.is_closed() {
            return;
        }
        self.pool.close();
        info!("✅ Database connection closed");
    }
}

/// Close an optional database; `None` is a no-op
pub fn close(db: Option<&Database>) {
    if let Some(db) = db {
        db.close();
    }
}

fn expired(metrics: &Metrics, max_lifetime: Duration) -> bool {
    metrics.age() > max_lifetime
}

/// Drop idle connections that are expired or exceed `max_idle`.
///
/// Returns how many were closed.
fn trim_idle(pool: &Pool, max_idle: usize, max_lifetime: Duration) -> usize {
    let mut kept = 0;
    let result = pool.retain(|_, metrics| {
        let keep = kept < max_idle && !expired(&metrics, max_lifetime);
        if keep {
            kept += 1;
        }
        keep
    });
    result.removed.len()
}

fn spawn_idle_reaper(pool: &Pool, max_idle: usize, max_lifetime: Duration) {
    // Pools built outside a runtime simply skip idle trimming
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        return;
    };

    let weak = pool.weak();
    runtime.spawn(async move {
        let mut ticker = tokio::time::interval(IDLE_REAP_INTERVAL);
        loop {
            ticker.tick().await;
            let Some(pool) = weak.upgrade() else { break };
            if pool.is_closed() {
                break;
            }
            let removed = trim_idle(&pool, max_idle, max_lifetime);
            if removed > 0 {
                debug!("Closed {} idle database connections", removed);
            }
        }
    });
}
