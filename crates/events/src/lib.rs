//! In-process eventing and alert notification delivery.
//!
//! The bus fans monitor events out to any number of subscribers (the
//! WebSocket stream being the main one); delivery sends best-effort alert
//! emails over SMTP.

pub mod bus;
pub mod delivery;

pub use bus::{EventBus, MonitorEvent};
