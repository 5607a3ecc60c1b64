//! Application configuration module
//!
//! Loads settings from environment variables, falling back to defaults.
//! Settings are built once at startup and passed explicitly to whoever needs them.

use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
    /// Upper bound on handling time for a single request
    pub request_timeout: Duration,
    /// Admission cap on concurrently in-flight requests
    pub max_in_flight: usize,
    /// How long in-flight requests may run after a shutdown signal
    pub shutdown_grace: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0), // Bind to all interfaces for Docker
            port: 8080,
            request_timeout: Duration::from_secs(60),
            max_in_flight: 100,
            shutdown_grace: Duration::from_secs(30),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Maximum open connections
    pub max_pool_size: usize,
    /// Idle connections kept beyond this count are closed
    pub max_idle: usize,
    /// Connections older than this are discarded instead of reused
    pub max_lifetime: Duration,
    /// Bound on establishing a single connection
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "sampleuser".to_string(),
            password: "samplepass".to_string(),
            database: "sampledb".to_string(),
            max_pool_size: 25,
            max_idle: 5,
            max_lifetime: Duration::from_secs(5 * 60),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Token signing configuration (loaded, not yet consumed by any endpoint)
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "your_jwt_secret".to_string(),
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl Settings {
    /// Load settings from the process environment (and `.env`, if present)
    pub fn load() -> Self {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    ///
    /// Unset and empty variables take their defaults, and so do values that
    /// fail to parse. This never fails.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let server_defaults = ServerConfig::default();
        let server = ServerConfig {
            host: parse_or(var("HOST"), server_defaults.host),
            port: parse_or(var("PORT"), server_defaults.port),
            ..server_defaults
        };

        let db_defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            host: var("DB_HOST").unwrap_or(db_defaults.host),
            port: parse_or(var("DB_PORT"), db_defaults.port),
            user: var("DB_USER").unwrap_or(db_defaults.user),
            password: var("DB_PASSWORD").unwrap_or(db_defaults.password),
            database: var("DB_NAME").unwrap_or(db_defaults.database),
            ..db_defaults
        };

        let auth = AuthConfig {
            jwt_secret: var("JWT_SECRET").unwrap_or_else(|| AuthConfig::default().jwt_secret),
        };

        Self {
            server,
            database,
            auth,
        }
    }

    /// Socket address the HTTP server binds to
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.server.host, self.server.port))
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
