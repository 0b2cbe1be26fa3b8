//! Periodic batch drainer
//!
//! Pulls bounded batches out of the alert queue on a fixed period and hands
//! them to the persistence layer. Cycles run inline on one dedicated task,
//! so two drains can never overlap. A failed cycle drops its batch, logs
//! the error and leaves the schedule untouched.

use crate::db::SqliteDb;
use crate::error::Result;
use crate::queue::AlertQueue;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Timer-driven consumer of the alert queue
pub struct BatchDrainer {
    queue: Arc<AlertQueue>,
    db: Arc<SqliteDb>,
    batch_size: usize,
    period: Duration,
    drain_on_start: bool,
}

impl BatchDrainer {
    pub fn new(
        queue: Arc<AlertQueue>,
        db: Arc<SqliteDb>,
        batch_size: usize,
        period: Duration,
        drain_on_start: bool,
    ) -> Self {
        Self {
            queue,
            db,
            batch_size,
            period,
            drain_on_start,
        }
    }

    /// Start the drain loop on its own task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "Batch drainer started (period={:?}, batch_size={})",
                self.period, self.batch_size
            );

            let first_tick = if self.drain_on_start {
                Instant::now()
            } else {
                Instant::now() + self.period
            };
            let mut ticker = time::interval_at(first_tick, self.period);
            // A cycle that outlives the period must not pile up extra
            // ticks behind it.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                match self.drain_cycle() {
                    Ok(0) => {}
                    Ok(n) => info!("saved {} alerts to db", n),
                    Err(e) => {
                        // Batch is dropped, not re-enqueued: accepted data
                        // loss on persistence failure.
                        error!("Drain cycle failed, batch dropped: {}", e);
                    }
                }
            }
        })
    }

    /// Run one drain cycle: pull a bounded batch and persist it.
    ///
    /// An empty queue is a no-op that opens no transaction. Returns the
    /// number of alerts persisted.
    pub fn drain_cycle(&self) -> Result<usize> {
        debug!("drain cycle: queue depth {}", self.queue.len());

        let batch = self.queue.drain_up_to(self.batch_size);
        if batch.is_empty() {
            return Ok(0);
        }

        if batch.len() == self.batch_size && !self.queue.is_empty() {
            warn!(
                "Drained a full batch of {} with {} alerts still queued",
                self.batch_size,
                self.queue.len()
            );
        }

        self.db.persist_batch(&batch)
    }
}
