//! # API Configuration Module
//!
//! Settings are read from environment variables (a `.env` file is loaded by the
//! binaries first). Only `DATABASE_URL` and `JWT_SECRET` are mandatory.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: bind address (default: "0.0.0.0")
//! - `API_PORT`: listen port (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
//! - `LOG_LEVEL`: trace, debug, info, warn or error (default: "info")
//! - `API_CORS_ORIGINS`: comma-separated list of allowed origins
//! - `JWT_SECRET`: HS256 signing secret (required)
//! - `JWT_EXPIRATION_HOURS`: token lifetime (default: 72)
//! - `API_REQUEST_TIMEOUT_SECONDS`: per-request timeout (default: 30)
//! - `JADWAL_VERIFY_LAB_NAME`: reject schedules naming an unknown lab (default: false)
//! - `ADMIN_EMAIL`, `ADMIN_PASSWORD`, `ADMIN_FULL_NAME`: optional admin account seeded at startup

use eyre::{Result, WrapErr, eyre};
use std::env;
use tracing::Level;

/// Administrator account created on startup when both email and password are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Configuration for the API server.
///
/// # Example
///
/// ```no_run
/// use labsched_api::config::ApiConfig;
///
/// let config = ApiConfig::from_env()?;
/// println!("Starting server on {}", config.server_addr());
/// # Ok::<(), eyre::Report>(())
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub log_level: Level,
    pub cors_origins: Option<Vec<String>>,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    /// Request timeout in seconds
    pub request_timeout: u64,
    pub verify_jadwal_lab_name: bool,
    pub admin: Option<AdminSeed>,
}

impl ApiConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` or `JWT_SECRET` is missing, or when a numeric
    /// setting that must be exact (`API_PORT`) does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;
        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(5);

        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Security settings
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| eyre!("JWT_SECRET environment variable must be set"))?;
        let jwt_expiration_hours = lookup("JWT_EXPIRATION_HOURS")
            .and_then(|value| value.parse().ok())
            .filter(|hours: &i64| *hours > 0)
            .unwrap_or(72);

        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        let verify_jadwal_lab_name = lookup("JADWAL_VERIFY_LAB_NAME")
            .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let admin = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminSeed {
                    full_name: lookup("ADMIN_FULL_NAME")
                        .unwrap_or_else(|| "Administrator".to_string()),
                    email,
                    password,
                })
            }
            _ => None,
        };

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            log_level,
            cors_origins,
            jwt_secret,
            jwt_expiration_hours,
            request_timeout,
            verify_jadwal_lab_name,
            admin,
        })
    }

    /// Returns the server address, e.g. "127.0.0.1:8080".
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
