//! SQLite persistence layer
//!
//! One connection pool shared by every drain cycle. Each cycle checks a
//! connection out, writes its whole batch in a single transaction and
//! returns the connection on every exit path.

pub mod models;
mod alerts;
mod migrations;
mod trades;

use crate::error::Result;
use crate::models::Alert;
use models::{AlertRow, NewAlert, NewTrade, TradeRow};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use uuid::Uuid;

type Pool = r2d2::Pool<SqliteConnectionManager>;
type PooledSqlite = r2d2::PooledConnection<SqliteConnectionManager>;

/// SQLite database wrapper
pub struct SqliteDb {
    pool: Pool,
}

impl SqliteDb {
    /// Open (or create) the database and run migrations
    pub fn new(path: &Path) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            // WAL for concurrent readers; busy_timeout bounds how long a
            // stuck write can hold up a drain cycle.
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;
                 PRAGMA synchronous=NORMAL;
                 PRAGMA busy_timeout=120000;
                 PRAGMA foreign_keys=ON;",
            )
        });
        let pool = Pool::new(manager)?;

        let db = Self { pool };
        db.run_migrations()?;

        Ok(db)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.pool.get()?;
        migrations::run_migrations(&conn)
    }

    /// Check a connection out of the pool
    pub fn conn(&self) -> Result<PooledSqlite> {
        Ok(self.pool.get()?)
    }

    /// Persist a drained batch atomically.
    ///
    /// Every alert gets a freshly generated id, then one trade is derived
    /// per alert (back-referencing that id, copying symbol, status and the
    /// receipt timestamp). Alert rows are bulk-inserted and trade rows
    /// bulk-upserted inside one transaction; a failure in either rolls the
    /// whole batch back. Returns the number of alerts persisted.
    pub fn persist_batch(&self, batch: &[Alert]) -> Result<usize> {
        let mut alert_rows = Vec::with_capacity(batch.len());
        let mut trade_rows = Vec::with_capacity(batch.len());

        for alert in batch {
            let alert_id = Uuid::new_v4().to_string();
            let received_at = alert.received_at.to_rfc3339();

            alert_rows.push(NewAlert {
                id: alert_id.clone(),
                symbol: alert.symbol.clone(),
                action: alert.action.as_str().to_string(),
                received_at: received_at.clone(),
            });
            trade_rows.push(NewTrade {
                id: Uuid::new_v4().to_string(),
                alert_id,
                symbol: alert.symbol.clone(),
                status: alert.action.as_str().to_string(),
                ts: received_at,
            });
        }

        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        alerts::insert_all(&tx, &alert_rows)?;
        trades::upsert_all(&tx, &trade_rows)?;
        tx.commit()?;

        Ok(batch.len())
    }

    // ========== Query helpers ==========

    pub fn count_alerts(&self) -> Result<i64> {
        let conn = self.conn()?;
        alerts::count(&conn)
    }

    pub fn count_trades(&self) -> Result<i64> {
        let conn = self.conn()?;
        trades::count(&conn)
    }

    pub fn get_alerts_by_symbol(&self, symbol: &str) -> Result<Vec<AlertRow>> {
        let conn = self.conn()?;
        alerts::get_by_symbol(&conn, symbol)
    }

    pub fn get_trade_by_symbol(&self, symbol: &str) -> Result<Option<TradeRow>> {
        let conn = self.conn()?;
        trades::get_by_symbol(&conn, symbol)
    }
}
