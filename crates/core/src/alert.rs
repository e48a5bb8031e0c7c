//! Threshold-breach alerts and the bounded alert log.

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::CoreError;
use crate::sensor::SensorKind;
use crate::types::{AlertId, Timestamp};

/// Most recent alerts retained; older entries are evicted.
pub const MAX_ALERTS: usize = 20;

/// Severity of a threshold breach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Outside the configured band.
    Warning,
    /// Far outside the band (below 80% of min or above 120% of max).
    Critical,
}

/// A single out-of-band reading.
///
/// `expected_range` is a snapshot of the threshold in force when the alert
/// was created; later threshold edits do not rewrite it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: AlertId,
    pub timestamp: Timestamp,
    #[serde(rename = "sensorType")]
    pub sensor: SensorKind,
    pub value: f64,
    pub expected_range: String,
    pub level: AlertLevel,
    pub read: bool,
}

/// Bounded list of alerts, newest first.
#[derive(Debug, Default)]
pub struct AlertLog {
    entries: VecDeque<Alert>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend an alert, evicting the oldest entry past [`MAX_ALERTS`].
    pub fn push(&mut self, alert: Alert) {
        self.entries.push_front(alert);
        self.entries.truncate(MAX_ALERTS);
    }

    /// Flip one alert's `read` flag to true. Idempotent for alerts already
    /// read; unknown ids are a not-found error.
    pub fn mark_read(&mut self, id: AlertId) -> Result<&Alert, CoreError> {
        let alert = self
            .entries
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(CoreError::NotFound {
                entity: "alert",
                id: id.to_string(),
            })?;
        alert.read = true;
        Ok(alert)
    }

    /// Drop every alert unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Alerts newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.entries.iter()
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|a| !a.read).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
