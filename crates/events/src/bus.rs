//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`MonitorEvent`]s,
//! shared via `Arc<EventBus>` across the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use envtrack_core::sensor::SensorKind;

// ---------------------------------------------------------------------------
// MonitorEvent
// ---------------------------------------------------------------------------

/// Something the monitoring loop observed.
///
/// Constructed via [`MonitorEvent::new`] and enriched with
/// [`with_sensor`](MonitorEvent::with_sensor) and
/// [`with_payload`](MonitorEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorEvent {
    /// Dot-separated event name, e.g. `"sensor.alert.raised"`.
    pub event_type: String,

    /// The sensor kind the event concerns, when there is a single one.
    pub sensor: Option<SensorKind>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl MonitorEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            sensor: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the sensor kind the event concerns.
    pub fn with_sensor(mut self, sensor: SensorKind) -> Self {
        self.sensor = Some(sensor);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`MonitorEvent`].
pub struct EventBus {
    sender: broadcast::Sender<MonitorEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With zero subscribers the event is silently dropped; nothing in the
    /// monitor depends on anyone listening.
    pub fn publish(&self, event: MonitorEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = MonitorEvent::new("sensor.alert.raised")
            .with_sensor(SensorKind::Humidity)
            .with_payload(serde_json::json!({"value": 87.2}));

        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "sensor.alert.raised");
        assert_eq!(received.sensor, Some(SensorKind::Humidity));
        assert_eq!(received.payload["value"], 87.2);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(MonitorEvent::new("sensor.reading"));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.event_type, "sensor.reading");
        assert_eq!(e2.event_type, "sensor.reading");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(MonitorEvent::new("orphan.event"));
    }

    #[test]
    fn default_event_has_empty_sensor_and_payload() {
        let event = MonitorEvent::new("bare.event");
        assert_eq!(event.event_type, "bare.event");
        assert!(event.sensor.is_none());
        assert!(event.payload.is_object());
    }
}
