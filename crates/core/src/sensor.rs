//! The four simulated sensor kinds and their fixed characteristics.
//!
//! Wire names are camelCase (`airQuality`, `soilQuality`) to match the
//! dashboard frontend's JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the four environmental quantities the simulator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SensorKind {
    Temperature,
    Humidity,
    AirQuality,
    SoilQuality,
}

impl SensorKind {
    /// Every sensor kind, in dashboard display order.
    pub const ALL: [SensorKind; 4] = [
        SensorKind::Temperature,
        SensorKind::Humidity,
        SensorKind::AirQuality,
        SensorKind::SoilQuality,
    ];

    /// Measurement unit attached to every reading of this kind.
    pub fn unit(self) -> &'static str {
        match self {
            SensorKind::Temperature => "°C",
            SensorKind::Humidity => "%",
            SensorKind::AirQuality => "AQI",
            SensorKind::SoilQuality => "SQI",
        }
    }

    /// Human-readable name for alert emails and logs.
    pub fn label(self) -> &'static str {
        match self {
            SensorKind::Temperature => "Temperature",
            SensorKind::Humidity => "Humidity",
            SensorKind::AirQuality => "Air Quality",
            SensorKind::SoilQuality => "Soil Quality",
        }
    }

    /// JSON wire name (also the path-segment form in the HTTP API).
    pub fn wire_name(self) -> &'static str {
        match self {
            SensorKind::Temperature => "temperature",
            SensorKind::Humidity => "humidity",
            SensorKind::AirQuality => "airQuality",
            SensorKind::SoilQuality => "soilQuality",
        }
    }

    /// Bounds the simulator draws values from. Wider than the default
    /// alert thresholds so breaches actually occur.
    pub fn simulation_range(self) -> (f64, f64) {
        match self {
            SensorKind::Temperature => (15.0, 35.0),
            SensorKind::Humidity => (20.0, 80.0),
            SensorKind::AirQuality => (0.0, 150.0),
            SensorKind::SoilQuality => (30.0, 90.0),
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for SensorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature" => Ok(SensorKind::Temperature),
            "humidity" => Ok(SensorKind::Humidity),
            "airQuality" => Ok(SensorKind::AirQuality),
            "soilQuality" => Ok(SensorKind::SoilQuality),
            other => Err(CoreError::Validation(format!(
                "Unknown sensor kind: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip_through_from_str() {
        for kind in SensorKind::ALL {
            let parsed: SensorKind = kind.wire_name().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn serde_uses_camel_case_wire_names() {
        let json = serde_json::to_string(&SensorKind::AirQuality).unwrap();
        assert_eq!(json, "\"airQuality\"");

        let back: SensorKind = serde_json::from_str("\"soilQuality\"").unwrap();
        assert_eq!(back, SensorKind::SoilQuality);
    }

    #[test]
    fn unknown_kind_is_a_validation_error() {
        let err = "co2".parse::<SensorKind>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
