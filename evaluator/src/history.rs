//! Bounded trial history
//!
//! Fixed-capacity FIFO over a `VecDeque`: pushing into a full history
//! evicts the oldest record in O(1).

use crate::state::TrialRecord;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct TrialHistory {
    capacity: usize,
    records: VecDeque<TrialRecord>,
}

impl TrialHistory {
    /// Create an empty history. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity.min(1024)),
        }
    }

    /// Append a record, returning the evicted one if the history was full
    pub fn push(&mut self, record: TrialRecord) -> Option<TrialRecord> {
        let evicted = if self.records.len() == self.capacity {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TrialRecord> + ExactSizeIterator {
        self.records.iter()
    }

    /// The last `n` records, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &TrialRecord> {
        let skip = self.records.len().saturating_sub(n);
        self.records.iter().skip(skip)
    }

    pub fn latest(&self) -> Option<&TrialRecord> {
        self.records.back()
    }

    pub fn oldest(&self) -> Option<&TrialRecord> {
        self.records.front()
    }

    /// Composite scores of the last `n` records, oldest first
    pub fn recent_composites(&self, n: usize) -> Vec<f64> {
        self.recent(n)
            .map(|r| r.evaluation.composite_score)
            .collect()
    }
}
