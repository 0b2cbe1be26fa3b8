//! In-memory alert buffer
//!
//! Single piece of mutable state shared between the ingestion handlers and
//! the batch drainer. Buffered alerts are lost on crash; durability starts
//! at the drain cycle.

use crate::models::Alert;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Thread-safe FIFO buffer of alerts pending persistence
#[derive(Debug, Default)]
pub struct AlertQueue {
    inner: Mutex<VecDeque<Alert>>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alert. Never blocks beyond the lock, never fails;
    /// bounded only by process memory.
    pub fn enqueue(&self, alert: Alert) {
        self.inner.lock().push_back(alert);
    }

    /// Atomically remove and return at most `n` alerts in FIFO order.
    ///
    /// Returns fewer than `n` (possibly none) when fewer are buffered.
    /// The lock serializes this against concurrent `enqueue` calls, so no
    /// alert is ever lost or duplicated.
    pub fn drain_up_to(&self, n: usize) -> Vec<Alert> {
        let mut queue = self.inner.lock();
        let count = n.min(queue.len());
        queue.drain(..count).collect()
    }

    /// Number of buffered alerts
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
