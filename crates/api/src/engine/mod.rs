//! The in-memory monitoring engine.

mod monitor;

pub use monitor::{Monitor, SensorSnapshot, SensorStatus, TickReport};
