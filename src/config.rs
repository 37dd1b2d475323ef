//! Configuration management for the contact book.
//!
//! This module handles loading and validating configuration from environment
//! variables, reading a `.env` file first if one is present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the contact book server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Contact store location (`sqlite://<path>` or `sqlite::memory:`)
    pub database_url: String,

    /// Interface to bind (default: 127.0.0.1)
    pub host: String,

    /// Port to listen on (default: 3000)
    pub port: u16,

    /// Directory served as static assets (default: "public")
    pub static_dir: PathBuf,

    /// Session cookie and flash message lifetime in seconds (default: 6)
    pub session_ttl_secs: u64,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `DATABASE_URL`: contact store location
    ///
    /// Optional environment variables:
    /// - `HOST`: bind address (default: 127.0.0.1)
    /// - `PORT`: listen port (default: 3000)
    /// - `STATIC_DIR`: static asset directory (default: public)
    /// - `SESSION_TTL_SECS`: session/flash lifetime (default: 6)
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        if !database_url.starts_with("sqlite:") {
            return Err(ConfigError::InvalidValue {
                var: "DATABASE_URL".to_string(),
                reason: "Must be sqlite://<path> or sqlite::memory:".to_string(),
            });
        }

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        if host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "HOST".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let port = Self::parse_env_u16("PORT", 3000)?;
        let session_ttl_secs = Self::parse_env_u64("SESSION_TTL_SECS", 6)?;
        if session_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: "SESSION_TTL_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            database_url,
            host,
            port,
            static_dir,
            session_ttl_secs,
            log_level,
        })
    }

    /// `host:port` to bind the listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u16 with a default value.
    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number between 0-65535, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: PathBuf::from("public"),
            session_ttl_secs: 6,
            log_level: "info".to_string(),
        }
    }
}
