//! Shared holder of the most recent order-book snapshot
//!
//! Single writer (the feed task), many readers (the compute cycle). The
//! store keeps only the latest value: no queue, no back-pressure, no
//! staleness detection. Readers may see the same snapshot repeatedly or
//! skip intermediates; they never see a half-written one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use types::book::OrderBookSnapshot;

/// Concurrency-safe latest-snapshot store.
///
/// Replace and read are pointer swaps under a short critical section; a
/// poisoned lock is recovered since the guarded value is just a handle.
pub struct SnapshotStore {
    latest: RwLock<Option<Arc<OrderBookSnapshot>>>,
    publishes: AtomicU64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            latest: RwLock::new(None),
            publishes: AtomicU64::new(0),
        }
    }

    /// Atomically replace the stored snapshot. Last writer wins.
    pub fn set(&self, snapshot: OrderBookSnapshot) {
        let mut guard = self
            .latest
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::new(snapshot));
        drop(guard);
        self.publishes.fetch_add(1, Ordering::Relaxed);
    }

    /// Atomically read the current snapshot. `None` before first publish.
    pub fn get(&self) -> Option<Arc<OrderBookSnapshot>> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of snapshots published since creation.
    pub fn publish_count(&self) -> u64 {
        self.publishes.load(Ordering::Relaxed)
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
