//! Append-only storage for accepted alerts

use crate::db::models::{AlertRow, NewAlert};
use crate::error::Result;
use rusqlite::{params, Connection};

/// Bulk-insert alert rows. Call inside an open transaction so the batch
/// commits or rolls back as one unit with the derived trades.
pub fn insert_all(conn: &Connection, rows: &[NewAlert]) -> Result<()> {
    let mut stmt = conn.prepare(
        r#"
        INSERT INTO alerts (id, symbol, action, received_at, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, datetime('now'), datetime('now'))
        "#,
    )?;

    for row in rows {
        stmt.execute(params![row.id, row.symbol, row.action, row.received_at])?;
    }

    Ok(())
}

/// Count persisted alerts
pub fn count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM alerts", [], |row| row.get(0))?;
    Ok(count)
}

/// Fetch alerts for a symbol in receipt order
pub fn get_by_symbol(conn: &Connection, symbol: &str) -> Result<Vec<AlertRow>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, symbol, action, received_at, created_at, updated_at
        FROM alerts
        WHERE symbol = ?1
        ORDER BY received_at ASC
        "#,
    )?;

    let rows = stmt
        .query_map([symbol], |row| {
            Ok(AlertRow {
                id: row.get(0)?,
                symbol: row.get(1)?,
                action: row.get(2)?,
                received_at: row.get(3)?,
                created_at: row.get(4)?,
                updated_at: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
