use std::sync::Arc;

use envtrack_events::delivery::EmailDelivery;
use envtrack_events::EventBus;

use crate::config::ServerConfig;
use crate::engine::Monitor;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (bind address, CORS, JWT, sampling interval).
    pub config: Arc<ServerConfig>,
    /// The in-memory monitoring engine (readings, thresholds, alerts, accuracy).
    pub monitor: Arc<Monitor>,
    /// Event bus feeding the WebSocket live stream.
    pub event_bus: Arc<EventBus>,
    /// Alert email delivery; `None` when SMTP is not configured.
    pub mailer: Option<Arc<EmailDelivery>>,
}
