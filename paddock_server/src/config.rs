//! Server configuration management.
//!
//! Consolidates all environment variable reads into one validated structure.

use paddock::db::DatabaseConfig;
use std::net::SocketAddr;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Database configuration
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// - `SERVER_BIND`: bind address (default `127.0.0.1:6868`)
    /// - `DATABASE_URL` and the `DB_*` pool variables; falls back to the
    ///   development database when `DATABASE_URL` is unset
    ///
    /// # Panics
    ///
    /// Panics if a set variable fails to parse.
    pub fn from_env() -> Self {
        let bind = std::env::var("SERVER_BIND")
            .unwrap_or_else(|_| "127.0.0.1:6868".to_string())
            .parse()
            .expect("SERVER_BIND must be a valid socket address");

        let database = if std::env::var("DATABASE_URL").is_ok() {
            DatabaseConfig::from_env()
        } else {
            DatabaseConfig::development()
        };

        Self { bind, database }
    }
}
