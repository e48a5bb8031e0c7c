//! Sensor readings and the capped per-kind history.

use std::collections::VecDeque;

use serde::Serialize;

use crate::types::Timestamp;

/// Maximum samples retained per sensor kind. Holds the 7-day hourly
/// backfill plus a few hours of live ticks; oldest samples are evicted.
pub const MAX_SAMPLES: usize = 1024;

/// A single sensor measurement. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    pub value: f64,
    pub unit: &'static str,
    pub timestamp: Timestamp,
}

/// Chronological, bounded log of readings for one sensor kind.
///
/// Samples are appended newest-last; when the capacity is reached the
/// oldest sample is dropped.
#[derive(Debug)]
pub struct ReadingHistory {
    samples: VecDeque<Reading>,
    capacity: usize,
}

impl ReadingHistory {
    pub fn new() -> Self {
        Self::with_capacity(MAX_SAMPLES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a reading, evicting the oldest if the history is full.
    pub fn push(&mut self, reading: Reading) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(reading);
    }

    /// The most recent reading, if any.
    pub fn latest(&self) -> Option<&Reading> {
        self.samples.back()
    }

    /// All retained readings at or after `cutoff`, oldest first.
    pub fn since(&self, cutoff: Timestamp) -> Vec<Reading> {
        self.samples
            .iter()
            .filter(|r| r.timestamp >= cutoff)
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for ReadingHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Reading> for ReadingHistory {
    fn extend<T: IntoIterator<Item = Reading>>(&mut self, iter: T) {
        for reading in iter {
            self.push(reading);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn reading_at(offset_mins: i64) -> Reading {
        Reading {
            value: 21.5,
            unit: "°C",
            timestamp: Utc::now() + Duration::minutes(offset_mins),
        }
    }

    #[test]
    fn push_evicts_oldest_when_full() {
        let mut history = ReadingHistory::with_capacity(3);
        for i in 0..5 {
            history.push(reading_at(i));
        }

        assert_eq!(history.len(), 3);
        // The two oldest samples are gone; the newest survives.
        let newest = history.latest().unwrap();
        assert_eq!(newest.timestamp, history.since(newest.timestamp)[0].timestamp);
    }

    #[test]
    fn since_filters_by_timestamp_oldest_first() {
        let mut history = ReadingHistory::new();
        history.push(reading_at(-120));
        history.push(reading_at(-30));
        history.push(reading_at(0));

        let cutoff = Utc::now() - Duration::minutes(60);
        let recent = history.since(cutoff);
        assert_eq!(recent.len(), 2);
        assert!(recent[0].timestamp < recent[1].timestamp);
    }

    #[test]
    fn latest_is_none_on_empty_history() {
        let history = ReadingHistory::new();
        assert!(history.latest().is_none());
        assert!(history.is_empty());
    }
}
