pub mod accuracy;
pub mod alerts;
pub mod auth;
pub mod health;
pub mod sensors;
pub mod thresholds;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /stream                       WebSocket live feed (readings + alerts)
///
/// /auth/login                   mock login (public)
/// /auth/register                mock register (public)
/// /auth/logout                  logout (requires auth)
///
/// /sensors/current              latest reading per kind with status
/// /sensors/{kind}/history       reading history (?hours=N, default 24)
///
/// /alerts                       list (GET), clear-all (DELETE)
/// /alerts/{id}/read             mark one alert read (POST)
/// /alerts/notify                send an alert email (POST)
///
/// /thresholds                   list bands (GET)
/// /thresholds/{kind}            update one band (PUT)
///
/// /accuracy                     detection scoreboard (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/stream", get(ws::stream_handler))
        .nest("/auth", auth::router())
        .nest("/sensors", sensors::router())
        .nest("/alerts", alerts::router())
        .nest("/thresholds", thresholds::router())
        .nest("/accuracy", accuracy::router())
}
