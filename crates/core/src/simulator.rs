//! Synthetic data generation.
//!
//! Every value is a bounded uniform draw from the kind's fixed range,
//! quantized to one decimal place. Pure generation; the caller supplies
//! the timestamp.

use chrono::Duration;
use rand::Rng;

use crate::reading::Reading;
use crate::sensor::SensorKind;
use crate::types::Timestamp;

/// How far back the startup backfill reaches.
pub const BACKFILL_DAYS: i64 = 7;

/// Spacing between backfilled samples.
pub const BACKFILL_STEP_MINUTES: i64 = 60;

/// Draw one reading for `kind`, stamped with `at`.
pub fn sample(kind: SensorKind, at: Timestamp) -> Reading {
    let (min, max) = kind.simulation_range();
    let value = rand::rng().random_range(min..=max);

    Reading {
        value: quantize(value),
        unit: kind.unit(),
        timestamp: at,
    }
}

/// Generate [`BACKFILL_DAYS`] of hourly readings ending at `now`, oldest
/// first, so history charts are populated from the first request.
pub fn backfill(kind: SensorKind, now: Timestamp) -> Vec<Reading> {
    let mut samples = Vec::new();
    let mut at = now - Duration::days(BACKFILL_DAYS);

    while at <= now {
        samples.push(sample(kind, at));
        at += Duration::minutes(BACKFILL_STEP_MINUTES);
    }

    samples
}

/// Round to one decimal place, matching the sensor display precision.
fn quantize(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
