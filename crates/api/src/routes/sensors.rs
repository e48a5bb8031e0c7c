//! Route definitions for the `/sensors` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::sensors;
use crate::state::AppState;

/// Routes mounted at `/sensors`.
///
/// ```text
/// GET /current         -> latest reading per kind
/// GET /{kind}/history  -> reading history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/current", get(sensors::current))
        .route("/{kind}/history", get(sensors::history))
}
