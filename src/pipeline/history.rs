use std::collections::VecDeque;
use std::num::NonZeroUsize;

use parking_lot::RwLock;
use serde::Serialize;

use crate::model::HealthStatus;
use crate::schema::FeatureVector;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    pub name: String,
    pub score: f64,
    pub status: HealthStatus,
    pub timestamp: String,
    pub readings: FeatureVector,
}

/// Newest-first log of predictions shared by every request.
///
/// `record` is the only mutation and runs under the write lock, so
/// concurrent submissions are neither lost nor interleaved. With a
/// capacity set, the oldest record is dropped once the log is full.
#[derive(Debug, Default)]
pub struct HistoryStore {
    records: RwLock<VecDeque<PredictionRecord>>,
    capacity: Option<NonZeroUsize>,
}

impl HistoryStore {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            records: RwLock::new(VecDeque::with_capacity(capacity.get().min(1024))),
            capacity: Some(capacity),
        }
    }

    /// `0` means unbounded.
    pub fn from_limit(limit: usize) -> Self {
        match NonZeroUsize::new(limit) {
            Some(cap) => Self::with_capacity(cap),
            None => Self::unbounded(),
        }
    }

    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    /// Prepends `record` and returns the resulting log, newest first.
    pub fn record(&self, record: PredictionRecord) -> Vec<PredictionRecord> {
        let mut records = self.records.write();
        records.push_front(record);
        if let Some(cap) = self.capacity {
            while records.len() > cap.get() {
                records.pop_back();
            }
        }
        records.iter().cloned().collect()
    }

    pub fn snapshot(&self) -> Vec<PredictionRecord> {
        self.records.read().iter().cloned().collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/history.rs"]
mod tests;
