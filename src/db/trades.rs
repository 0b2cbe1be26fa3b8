//! Derived trade state, one row per symbol

use crate::db::models::{NewTrade, TradeRow};
use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// Bulk-upsert trade rows keyed on symbol. A re-derived trade for an
/// existing symbol updates the row in place (latest status wins); the
/// original trade id is kept stable. Call inside an open transaction.
pub fn upsert_all(conn: &Connection, rows: &[NewTrade]) -> Result<()> {
    let mut stmt = conn.prepare(
        r#"
        INSERT INTO trades (id, alert_id, symbol, status, ts, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, datetime('now'), datetime('now'))
        ON CONFLICT(symbol) DO UPDATE SET
            alert_id = excluded.alert_id,
            status = excluded.status,
            ts = excluded.ts,
            updated_at = datetime('now')
        "#,
    )?;

    for row in rows {
        stmt.execute(params![row.id, row.alert_id, row.symbol, row.status, row.ts])?;
    }

    Ok(())
}

/// Count trade rows
pub fn count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM trades", [], |row| row.get(0))?;
    Ok(count)
}

/// Fetch the trade for a symbol, if any
pub fn get_by_symbol(conn: &Connection, symbol: &str) -> Result<Option<TradeRow>> {
    let row = conn
        .query_row(
            r#"
            SELECT id, alert_id, symbol, status, ts, created_at, updated_at
            FROM trades
            WHERE symbol = ?1
            "#,
            [symbol],
            |row| {
                Ok(TradeRow {
                    id: row.get(0)?,
                    alert_id: row.get(1)?,
                    symbol: row.get(2)?,
                    status: row.get(3)?,
                    ts: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            },
        )
        .optional()?;

    Ok(row)
}
