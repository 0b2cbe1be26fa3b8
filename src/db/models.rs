//! Persisted row types

use serde::Serialize;

/// Alert values for the write path; `created_at`/`updated_at` are set by
/// the database at insert time.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub id: String,
    pub symbol: String,
    pub action: String,
    pub received_at: String,
}

/// Trade values for the write path
#[derive(Debug, Clone)]
pub struct NewTrade {
    pub id: String,
    pub alert_id: String,
    pub symbol: String,
    pub status: String,
    pub ts: String,
}

/// Row read back from the append-only `alerts` table
#[derive(Debug, Clone, Serialize)]
pub struct AlertRow {
    pub id: String,
    pub symbol: String,
    pub action: String,
    pub received_at: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Row read back from the `trades` table. One logical trade per symbol;
/// re-derived trades upsert onto the existing row, latest status wins.
#[derive(Debug, Clone, Serialize)]
pub struct TradeRow {
    pub id: String,
    pub alert_id: String,
    pub symbol: String,
    pub status: String,
    pub ts: String,
    pub created_at: String,
    pub updated_at: String,
}
