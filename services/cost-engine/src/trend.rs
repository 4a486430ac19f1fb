//! Bounded trend history of cost estimates
//!
//! Append-only with FIFO eviction; insertion order is arrival order.
//! Owned and mutated exclusively by the compute cycle.

use std::collections::VecDeque;

use types::estimate::CostEstimate;

/// Default number of estimates retained.
pub const TREND_CAPACITY: usize = 100;

/// Time-ordered buffer of the most recent cost estimates.
pub struct TrendHistory {
    entries: VecDeque<CostEstimate>,
    capacity: usize,
}

impl TrendHistory {
    pub fn new() -> Self {
        Self::with_capacity(TREND_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an estimate, evicting the oldest entry when full.
    pub fn append(&mut self, estimate: CostEstimate) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(estimate);
    }

    /// Read-only view of the current contents in arrival order.
    pub fn entries(&self) -> impl Iterator<Item = &CostEstimate> {
        self.entries.iter()
    }

    /// Most recently appended estimate, if any.
    pub fn latest(&self) -> Option<&CostEstimate> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TrendHistory {
    fn default() -> Self {
        Self::new()
    }
}
