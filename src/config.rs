//! Environment-driven configuration
//!
//! Loaded once at startup and immutable afterwards. A `.env` file in the
//! working directory is honored (see `main`), real environment variables
//! take precedence.

use crate::error::{AppError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP server
    pub host: String,
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Base URL of the external trading API
    pub exchange_api_url: String,

    /// Timeout for each forwarded call
    pub exchange_timeout: Duration,

    /// Ceiling on alerts flushed per drain cycle
    pub max_batch_size: usize,

    /// Period between drain cycles
    pub drain_interval: Duration,

    /// Run one drain cycle immediately at startup instead of waiting
    /// for the first full period
    pub drain_on_start: bool,
}

impl Config {
    /// Read configuration from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env_or("HOST", "127.0.0.1"),
            port: env_parse("PORT", 5000)?,
            database_path: PathBuf::from(env_or("DATABASE_PATH", "alert_relay.db")),
            exchange_api_url: env_or("EXCHANGE_API_URL", "https://reqres.in"),
            exchange_timeout: Duration::from_secs(env_parse("EXCHANGE_TIMEOUT_SECS", 5)?),
            max_batch_size: env_parse("DB_MAX_BATCH_SIZE", 100)?,
            drain_interval: Duration::from_secs(env_parse("DRAIN_INTERVAL_SECS", 10)?),
            drain_on_start: env_parse("DRAIN_ON_START", false)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid value '{}' for {}", raw, name))),
        Err(_) => Ok(default),
    }
}
