//! Alert relay - webhook ingestion with batched persistence
//!
//! Accepts small JSON alert events over HTTP, buffers them in memory,
//! periodically flushes bounded batches into SQLite (alerts append-only,
//! trades upserted per symbol) and forwards each accepted alert to an
//! external trading API on a best-effort basis.

pub mod config;
pub mod db;
pub mod drainer;
pub mod error;
pub mod forwarder;
pub mod models;
pub mod queue;
pub mod server;
pub mod state;
