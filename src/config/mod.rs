//! Configuration module for the updates backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string (required to start)
    pub database_url: Option<String>,
    /// TLS mode for the store connection (disable, allow, prefer, require, verify-ca, verify-full)
    pub database_ssl_mode: String,
    /// Expected admin username (required at login time)
    pub admin_user: Option<String>,
    /// Expected admin password (required at login time)
    pub admin_password: Option<String>,
    /// HMAC key for signing and verifying session tokens
    pub jwt_secret: Option<String>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok();

        let database_ssl_mode =
            env::var("DATABASE_SSL_MODE").unwrap_or_else(|_| "require".to_string());

        let admin_user = env::var("ADMIN_USER").ok();
        let admin_password = env::var("ADMIN_PASSWORD").ok();
        let jwt_secret = env::var("JWT_SECRET").ok();

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid BIND_ADDR format");

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            database_ssl_mode,
            admin_user,
            admin_password,
            jwt_secret,
            bind_addr,
            log_level,
        }
    }
}
