//! Confusion-matrix counters for the anomaly-detector scoreboard.
//!
//! The "detector" is a mock: whenever an alert fires, a weighted coin
//! decides whether it counts as a true or false positive. The derived
//! metrics are recomputed from the four counters on every read and are
//! never stored, so they cannot drift out of sync.

use rand::Rng;
use serde::Serialize;

/// Probability that a raised alert is scored as a true positive.
const TRUE_POSITIVE_RATE: f64 = 0.9;

/// How the mock detector scored one raised alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionOutcome {
    TruePositive,
    FalsePositive,
}

impl DetectionOutcome {
    /// Flip the weighted coin (90% true positive).
    pub fn sample() -> Self {
        if rand::rng().random_bool(TRUE_POSITIVE_RATE) {
            DetectionOutcome::TruePositive
        } else {
            DetectionOutcome::FalsePositive
        }
    }
}

/// Raw true/false positive/negative tallies. Never reset while the
/// process lives.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionCounters {
    pub true_positives: u32,
    pub false_positives: u32,
    pub true_negatives: u32,
    pub false_negatives: u32,
}

impl DetectionCounters {
    /// All-zero counters.
    pub fn new() -> Self {
        Self {
            true_positives: 0,
            false_positives: 0,
            true_negatives: 0,
            false_negatives: 0,
        }
    }

    /// The scoreboard's demo starting point.
    pub fn seeded() -> Self {
        Self {
            true_positives: 85,
            false_positives: 12,
            true_negatives: 145,
            false_negatives: 8,
        }
    }

    /// Tally one detection outcome.
    pub fn record(&mut self, outcome: DetectionOutcome) {
        match outcome {
            DetectionOutcome::TruePositive => self.true_positives += 1,
            DetectionOutcome::FalsePositive => self.false_positives += 1,
        }
    }

    /// Derive the scoreboard metrics. Degenerate denominators yield 0.
    pub fn report(&self) -> AccuracyReport {
        let tp = f64::from(self.true_positives);
        let fp = f64::from(self.false_positives);
        let tn = f64::from(self.true_negatives);
        let fn_ = f64::from(self.false_negatives);

        let accuracy = ratio(tp + tn, tp + fp + tn + fn_);
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1_score = ratio(2.0 * precision * recall, precision + recall);

        AccuracyReport {
            counters: *self,
            accuracy,
            precision,
            recall,
            f1_score,
        }
    }
}

impl Default for DetectionCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters plus the metrics derived from them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyReport {
    #[serde(flatten)]
    pub counters: DetectionCounters,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_derives_metrics_from_the_counters() {
        let report = DetectionCounters::seeded().report();

        // (85 + 145) / 250
        assert!((report.accuracy - 0.92).abs() < 1e-9);
        // 85 / 97
        assert!((report.precision - 85.0 / 97.0).abs() < 1e-9);
        // 85 / 93
        assert!((report.recall - 85.0 / 93.0).abs() < 1e-9);

        let expected_f1 = 2.0 * report.precision * report.recall
            / (report.precision + report.recall);
        assert!((report.f1_score - expected_f1).abs() < 1e-9);
    }

    #[test]
    fn record_increments_only_the_matching_counter() {
        let mut counters = DetectionCounters::seeded();
        counters.record(DetectionOutcome::TruePositive);
        counters.record(DetectionOutcome::FalsePositive);
        counters.record(DetectionOutcome::FalsePositive);

        assert_eq!(counters.true_positives, 86);
        assert_eq!(counters.false_positives, 14);
        assert_eq!(counters.true_negatives, 145);
        assert_eq!(counters.false_negatives, 8);
    }

    #[test]
    fn zero_counters_report_zero_metrics_without_panicking() {
        let report = DetectionCounters::new().report();
        assert_eq!(report.accuracy, 0.0);
        assert_eq!(report.precision, 0.0);
        assert_eq!(report.recall, 0.0);
        assert_eq!(report.f1_score, 0.0);
    }

    #[test]
    fn sample_returns_both_outcomes_over_many_flips() {
        let mut saw_tp = false;
        let mut saw_fp = false;
        for _ in 0..2000 {
            match DetectionOutcome::sample() {
                DetectionOutcome::TruePositive => saw_tp = true,
                DetectionOutcome::FalsePositive => saw_fp = true,
            }
            if saw_tp && saw_fp {
                break;
            }
        }
        assert!(saw_tp && saw_fp, "weighted coin should land on both sides");
    }
}
