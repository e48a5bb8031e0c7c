//! Per-sensor alert bands and breach classification.
//!
//! Pure logic -- the engine fetches the band and the reading and passes
//! them in. Every evaluation is independent: no hysteresis, no cooldown.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::alert::AlertLevel;
use crate::error::CoreError;
use crate::sensor::SensorKind;

/// A value below `min * CRITICAL_LOW_FACTOR` (or above
/// `max * CRITICAL_HIGH_FACTOR`) escalates from warning to critical.
const CRITICAL_LOW_FACTOR: f64 = 0.8;
const CRITICAL_HIGH_FACTOR: f64 = 1.2;

/// An inclusive `[min, max]` band a reading is expected to stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub min: f64,
    pub max: f64,
}

impl Threshold {
    /// Default alert band for a sensor kind. Narrower than the simulation
    /// range, so out-of-band readings occur regularly.
    pub fn default_for(kind: SensorKind) -> Self {
        let (min, max) = match kind {
            SensorKind::Temperature => (18.0, 30.0),
            SensorKind::Humidity => (30.0, 60.0),
            SensorKind::AirQuality => (0.0, 50.0),
            SensorKind::SoilQuality => (40.0, 80.0),
        };
        Self { min, max }
    }

    /// Reject non-finite or inverted bands.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(CoreError::Validation(
                "Threshold values must be finite numbers".to_string(),
            ));
        }
        if self.min >= self.max {
            return Err(CoreError::Validation(
                "min must be less than max".to_string(),
            ));
        }
        Ok(())
    }

    /// Classify a value against this band.
    ///
    /// `None` means in range. A breach is critical when the value is far
    /// outside the band, warning otherwise.
    pub fn breach(&self, value: f64) -> Option<AlertLevel> {
        if value < self.min * CRITICAL_LOW_FACTOR || value > self.max * CRITICAL_HIGH_FACTOR {
            Some(AlertLevel::Critical)
        } else if value < self.min || value > self.max {
            Some(AlertLevel::Warning)
        } else {
            None
        }
    }

    /// Textual snapshot of the band for alert records, e.g. `"18-30 °C"`.
    pub fn expected_range(&self, unit: &str) -> String {
        format!("{}-{} {}", self.min, self.max, unit)
    }
}

/// The current band per sensor kind.
#[derive(Debug)]
pub struct ThresholdTable {
    bands: HashMap<SensorKind, Threshold>,
}

impl ThresholdTable {
    /// A table holding every kind's default band.
    pub fn defaults() -> Self {
        let bands = SensorKind::ALL
            .into_iter()
            .map(|kind| (kind, Threshold::default_for(kind)))
            .collect();
        Self { bands }
    }

    pub fn get(&self, kind: SensorKind) -> Threshold {
        // Construction guarantees a band for every kind.
        self.bands[&kind]
    }

    /// Replace a kind's band after validating it.
    pub fn set(&mut self, kind: SensorKind, band: Threshold) -> Result<Threshold, CoreError> {
        band.validate()?;
        self.bands.insert(kind, band);
        Ok(band)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SensorKind, Threshold)> + '_ {
        SensorKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}
