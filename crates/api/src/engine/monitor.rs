//! All monitored state behind one lock, mutated by a single periodic writer.
//!
//! The background sampler is the only caller of [`Monitor::tick`]; handlers
//! only read or perform the small user mutations (threshold edits, alert
//! read flags). That keeps single-writer timer semantics: a tick observes
//! the thresholds in force when it runs, and an alert's range snapshot is
//! taken under the same lock that created it.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use envtrack_core::accuracy::{AccuracyReport, DetectionCounters, DetectionOutcome};
use envtrack_core::alert::{Alert, AlertLevel, AlertLog};
use envtrack_core::error::CoreError;
use envtrack_core::reading::{Reading, ReadingHistory};
use envtrack_core::sensor::SensorKind;
use envtrack_core::simulator;
use envtrack_core::threshold::{Threshold, ThresholdTable};
use envtrack_core::types::{AlertId, Timestamp};

/// Classification of a current reading against its threshold band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Normal,
    Warning,
    Critical,
}

impl From<Option<AlertLevel>> for SensorStatus {
    fn from(breach: Option<AlertLevel>) -> Self {
        match breach {
            None => SensorStatus::Normal,
            Some(AlertLevel::Warning) => SensorStatus::Warning,
            Some(AlertLevel::Critical) => SensorStatus::Critical,
        }
    }
}

/// The latest reading for one sensor kind, as the dashboard cards show it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    pub sensor: SensorKind,
    pub value: f64,
    pub unit: &'static str,
    pub timestamp: Timestamp,
    pub status: SensorStatus,
}

/// What one tick produced: the new readings and any alerts they raised.
#[derive(Debug)]
pub struct TickReport {
    pub readings: Vec<(SensorKind, Reading)>,
    pub alerts: Vec<Alert>,
}

#[derive(Debug)]
struct MonitorState {
    histories: HashMap<SensorKind, ReadingHistory>,
    thresholds: ThresholdTable,
    alerts: AlertLog,
    detections: DetectionCounters,
}

/// The monitoring engine: seeded histories, threshold bands, the alert
/// log, and the detection scoreboard, all behind one async `RwLock`.
pub struct Monitor {
    state: RwLock<MonitorState>,
}

impl Monitor {
    /// Build a monitor with 7 days of backfilled history per sensor kind,
    /// default thresholds, an empty alert log, and the seeded scoreboard.
    pub fn new() -> Self {
        let now = Utc::now();
        let histories = SensorKind::ALL
            .into_iter()
            .map(|kind| {
                let mut history = ReadingHistory::new();
                history.extend(simulator::backfill(kind, now));
                (kind, history)
            })
            .collect();

        Self {
            state: RwLock::new(MonitorState {
                histories,
                thresholds: ThresholdTable::defaults(),
                alerts: AlertLog::new(),
                detections: DetectionCounters::seeded(),
            }),
        }
    }

    /// Run one simulation cycle: sample every sensor kind, evaluate each
    /// reading against the band currently in force, append breaches to the
    /// alert log, and score each breach on the detection counters.
    pub async fn tick(&self) -> TickReport {
        let now = Utc::now();
        let mut state = self.state.write().await;

        let mut readings = Vec::with_capacity(SensorKind::ALL.len());
        let mut alerts = Vec::new();

        for kind in SensorKind::ALL {
            let reading = simulator::sample(kind, now);
            state
                .histories
                .get_mut(&kind)
                .expect("history exists for every kind")
                .push(reading);

            let band = state.thresholds.get(kind);
            if let Some(level) = band.breach(reading.value) {
                let alert = Alert {
                    id: Uuid::new_v4(),
                    timestamp: now,
                    sensor: kind,
                    value: reading.value,
                    // Snapshot of the band in force now; later edits to the
                    // threshold must not rewrite it.
                    expected_range: band.expected_range(kind.unit()),
                    level,
                    read: false,
                };
                state.alerts.push(alert.clone());
                state.detections.record(DetectionOutcome::sample());
                alerts.push(alert);
            }

            readings.push((kind, reading));
        }

        TickReport { readings, alerts }
    }

    /// Latest reading per kind with its normal/warning/critical status,
    /// in dashboard display order.
    pub async fn current(&self) -> Vec<SensorSnapshot> {
        let state = self.state.read().await;

        SensorKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let reading = state.histories[&kind].latest()?;
                let band = state.thresholds.get(kind);
                Some(SensorSnapshot {
                    sensor: kind,
                    value: reading.value,
                    unit: reading.unit,
                    timestamp: reading.timestamp,
                    status: band.breach(reading.value).into(),
                })
            })
            .collect()
    }

    /// Retained readings for one kind over the last `hours`, oldest first.
    pub async fn history(&self, kind: SensorKind, hours: i64) -> Vec<Reading> {
        let cutoff = Utc::now() - Duration::hours(hours);
        let state = self.state.read().await;
        state.histories[&kind].since(cutoff)
    }

    /// All alerts, newest first.
    pub async fn alerts(&self) -> Vec<Alert> {
        let state = self.state.read().await;
        state.alerts.iter().cloned().collect()
    }

    /// Flip one alert's read flag. Idempotent; unknown ids are not found.
    pub async fn mark_alert_read(&self, id: AlertId) -> Result<Alert, CoreError> {
        let mut state = self.state.write().await;
        state.alerts.mark_read(id).map(Clone::clone)
    }

    /// Drop every alert.
    pub async fn clear_alerts(&self) {
        let mut state = self.state.write().await;
        state.alerts.clear();
    }

    /// Current band per sensor kind, in display order.
    pub async fn thresholds(&self) -> Vec<(SensorKind, Threshold)> {
        let state = self.state.read().await;
        state.thresholds.iter().collect()
    }

    /// Replace one kind's band. Existing alerts keep their range snapshot.
    pub async fn update_threshold(
        &self,
        kind: SensorKind,
        band: Threshold,
    ) -> Result<Threshold, CoreError> {
        let mut state = self.state.write().await;
        state.thresholds.set(kind, band)
    }

    /// The detection scoreboard with derived metrics.
    pub async fn accuracy(&self) -> AccuracyReport {
        let state = self.state.read().await;
        state.detections.report()
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// A band no simulated reading can satisfy, so every tick breaches.
    const IMPOSSIBLE_BAND: Threshold = Threshold {
        min: 1000.0,
        max: 2000.0,
    };

    #[tokio::test]
    async fn new_monitor_has_backfilled_history_and_no_alerts() {
        let monitor = Monitor::new();

        let current = monitor.current().await;
        assert_eq!(current.len(), SensorKind::ALL.len());

        let history = monitor.history(SensorKind::Temperature, 24).await;
        assert!(!history.is_empty(), "backfill should populate history");

        assert!(monitor.alerts().await.is_empty());
    }

    #[tokio::test]
    async fn tick_appends_history_and_raises_alerts_on_breach() {
        let monitor = Monitor::new();
        for kind in SensorKind::ALL {
            monitor.update_threshold(kind, IMPOSSIBLE_BAND).await.unwrap();
        }

        let report = monitor.tick().await;
        assert_eq!(report.readings.len(), SensorKind::ALL.len());
        // Every reading sits far below min=1000, so each one is critical.
        assert_eq!(report.alerts.len(), SensorKind::ALL.len());
        assert!(report
            .alerts
            .iter()
            .all(|a| a.level == AlertLevel::Critical && !a.read));

        assert_eq!(monitor.alerts().await.len(), SensorKind::ALL.len());
    }

    #[tokio::test]
    async fn alert_range_snapshot_survives_threshold_edits() {
        let monitor = Monitor::new();
        monitor
            .update_threshold(SensorKind::Temperature, IMPOSSIBLE_BAND)
            .await
            .unwrap();

        let report = monitor.tick().await;
        let alert = report
            .alerts
            .iter()
            .find(|a| a.sensor == SensorKind::Temperature)
            .expect("temperature must breach the impossible band");
        assert_eq!(alert.expected_range, "1000-2000 °C");

        // Edit the band afterwards; the recorded alert keeps its snapshot.
        monitor
            .update_threshold(SensorKind::Temperature, Threshold { min: 0.0, max: 100.0 })
            .await
            .unwrap();

        let alerts = monitor.alerts().await;
        let stored = alerts.iter().find(|a| a.id == alert.id).unwrap();
        assert_eq!(stored.expected_range, "1000-2000 °C");
    }

    #[tokio::test]
    async fn breaches_move_the_detection_counters() {
        let monitor = Monitor::new();
        let before = monitor.accuracy().await;

        for kind in SensorKind::ALL {
            monitor.update_threshold(kind, IMPOSSIBLE_BAND).await.unwrap();
        }
        monitor.tick().await;

        let after = monitor.accuracy().await;
        let raised = (after.counters.true_positives + after.counters.false_positives)
            - (before.counters.true_positives + before.counters.false_positives);
        assert_eq!(raised, SensorKind::ALL.len() as u32);
        // Negatives are never touched by the mock detector.
        assert_eq!(
            after.counters.true_negatives,
            before.counters.true_negatives
        );
        assert_eq!(
            after.counters.false_negatives,
            before.counters.false_negatives
        );
    }

    #[tokio::test]
    async fn mark_read_and_clear_work_through_the_engine() {
        let monitor = Monitor::new();
        monitor
            .update_threshold(SensorKind::Humidity, IMPOSSIBLE_BAND)
            .await
            .unwrap();
        let report = monitor.tick().await;
        let id = report
            .alerts
            .iter()
            .find(|a| a.sensor == SensorKind::Humidity)
            .unwrap()
            .id;

        assert!(monitor.mark_alert_read(id).await.unwrap().read);
        // Idempotent.
        assert!(monitor.mark_alert_read(id).await.unwrap().read);

        monitor.clear_alerts().await;
        assert!(monitor.alerts().await.is_empty());

        // The id is gone after a clear.
        assert_matches!(
            monitor.mark_alert_read(id).await,
            Err(CoreError::NotFound { entity: "alert", .. })
        );
    }
}
