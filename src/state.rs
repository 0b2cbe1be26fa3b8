//! Application state shared across request handlers and background tasks

use crate::config::Config;
use crate::db::SqliteDb;
use crate::error::Result;
use crate::forwarder::{Forwarder, HttpExchangeApi};
use crate::queue::AlertQueue;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    /// SQLite database pool
    pub sqlite: Arc<SqliteDb>,

    /// In-memory buffer between ingestion and the batch drainer
    pub queue: Arc<AlertQueue>,

    /// Fire-and-forget trading API dispatcher
    pub forwarder: Forwarder,

    /// Startup configuration, immutable for the process lifetime
    pub config: Config,
}

impl AppState {
    /// Wire up state from configuration
    pub fn new(config: Config) -> Result<Self> {
        tracing::info!("Database path: {:?}", config.database_path);
        let sqlite = Arc::new(SqliteDb::new(&config.database_path)?);

        let api = Arc::new(HttpExchangeApi::new(
            &config.exchange_api_url,
            config.exchange_timeout,
        )?);

        Ok(Self {
            sqlite,
            queue: Arc::new(AlertQueue::new()),
            forwarder: Forwarder::new(api),
            config,
        })
    }
}
