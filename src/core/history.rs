// AgroCast - core/history.rs
//
// Bounded in-memory list of completed analyses, newest first.
// Nothing here is persisted; records live for the session only.

use crate::core::model::{ClassificationResult, ScanRecord};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::path::PathBuf;

/// Recent scan records, newest at the front.
#[derive(Debug, Clone)]
pub struct ScanHistory {
    records: VecDeque<ScanRecord>,
    capacity: usize,
    next_id: u64,
}

impl ScanHistory {
    /// Create an empty history holding at most `capacity` records
    /// (a capacity of zero is treated as one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// Record a completed analysis and return the stored record.
    /// Evicts the oldest record when full.
    pub fn push(
        &mut self,
        result: &ClassificationResult,
        path: PathBuf,
        timestamp: DateTime<Utc>,
    ) -> &ScanRecord {
        let record = ScanRecord {
            id: self.next_id,
            timestamp,
            path,
            label: result.label.clone(),
            confidence: result.confidence,
            is_healthy: result.is_healthy,
            treatment: result.treatment.clone(),
        };
        self.next_id += 1;

        if self.records.len() == self.capacity {
            if let Some(evicted) = self.records.pop_back() {
                tracing::debug!(id = evicted.id, "Scan history full; evicted oldest record");
            }
        }
        self.records.push_front(record);
        &self.records[0]
    }

    /// Up to `n` most recent records, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ScanRecord> {
        self.records.iter().take(n)
    }

    /// All records, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &ScanRecord> {
        self.records.iter()
    }

    /// Owned copy of all records, newest first (for export).
    pub fn to_vec(&self) -> Vec<ScanRecord> {
        self.records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remove all records. IDs keep increasing afterwards.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Default for ScanHistory {
    fn default() -> Self {
        Self::new(crate::util::constants::DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::classify_seed;
    use crate::core::model::SeedValue;

    fn result(seed: f64) -> ClassificationResult {
        classify_seed(SeedValue::from_raw(seed))
    }

    #[test]
    fn test_push_newest_first() {
        let mut h = ScanHistory::new(10);
        h.push(&result(0.1), PathBuf::from("a.jpg"), Utc::now());
        h.push(&result(0.6), PathBuf::from("b.jpg"), Utc::now());

        let labels: Vec<_> = h.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Powdery Mildew", "Healthy"]);
        let ids: Vec<_> = h.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_capacity_bound_evicts_oldest() {
        let mut h = ScanHistory::new(3);
        for i in 0..5 {
            h.push(&result(0.1), PathBuf::from(format!("{i}.jpg")), Utc::now());
        }
        assert_eq!(h.len(), 3);
        let names: Vec<_> = h.iter().map(|r| r.file_name()).collect();
        assert_eq!(names, vec!["4.jpg", "3.jpg", "2.jpg"]);
    }

    #[test]
    fn test_recent_limits_count() {
        let mut h = ScanHistory::new(10);
        for _ in 0..5 {
            h.push(&result(0.95), PathBuf::from("leaf.png"), Utc::now());
        }
        assert_eq!(h.recent(3).count(), 3);
        assert_eq!(h.recent(10).count(), 5);
    }

    #[test]
    fn test_zero_capacity_treated_as_one() {
        let mut h = ScanHistory::new(0);
        h.push(&result(0.1), PathBuf::from("a.jpg"), Utc::now());
        h.push(&result(0.1), PathBuf::from("b.jpg"), Utc::now());
        assert_eq!(h.capacity(), 1);
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn test_clear_keeps_ids_increasing() {
        let mut h = ScanHistory::new(5);
        h.push(&result(0.1), PathBuf::from("a.jpg"), Utc::now());
        h.clear();
        assert!(h.is_empty());
        let id = h.push(&result(0.1), PathBuf::from("b.jpg"), Utc::now()).id;
        assert_eq!(id, 2);
    }
}
