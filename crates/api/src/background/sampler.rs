//! The periodic sampling loop.
//!
//! Drives [`Monitor::tick`] on a fixed interval: every cycle simulates one
//! reading per sensor kind, publishes the results on the event bus, and
//! fires a best-effort email for each raised alert. Email failures are
//! logged and swallowed -- they never touch monitor state, and there is
//! no retry.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use envtrack_events::delivery::{AlertEmail, EmailDelivery};
use envtrack_events::{EventBus, MonitorEvent};

use crate::engine::Monitor;

/// Run the sampling loop until `cancel` is triggered.
pub async fn run(
    monitor: Arc<Monitor>,
    bus: Arc<EventBus>,
    mailer: Option<Arc<EmailDelivery>>,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        email_enabled = mailer.is_some(),
        "Sampling loop started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Sampling loop stopping");
                break;
            }
            _ = ticker.tick() => {
                let report = monitor.tick().await;

                for (kind, reading) in &report.readings {
                    bus.publish(
                        MonitorEvent::new("sensor.reading")
                            .with_sensor(*kind)
                            .with_payload(
                                serde_json::to_value(reading)
                                    .unwrap_or_else(|_| serde_json::json!({})),
                            ),
                    );
                }

                for alert in &report.alerts {
                    tracing::warn!(
                        sensor = %alert.sensor,
                        value = alert.value,
                        expected = %alert.expected_range,
                        level = ?alert.level,
                        "Threshold breach"
                    );

                    bus.publish(
                        MonitorEvent::new("sensor.alert.raised")
                            .with_sensor(alert.sensor)
                            .with_payload(
                                serde_json::to_value(alert)
                                    .unwrap_or_else(|_| serde_json::json!({})),
                            ),
                    );

                    // Fire-and-forget: delivery runs detached so a slow SMTP
                    // server cannot stall the sampling interval.
                    if let Some(mailer) = &mailer {
                        let mailer = Arc::clone(mailer);
                        let email = AlertEmail::from(alert);
                        tokio::spawn(async move {
                            if let Err(e) = mailer.deliver(&email).await {
                                tracing::warn!(error = %e, "Alert email delivery failed");
                            }
                        });
                    }
                }
            }
        }
    }
}
