//! Route definitions for the `/alerts` resource.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

/// Routes mounted at `/alerts`.
///
/// ```text
/// GET    /            -> list (newest first)
/// DELETE /            -> clear all
/// POST   /{id}/read   -> mark one read
/// POST   /notify      -> send an alert email
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", delete(alerts::clear).get(alerts::list))
        .route("/{id}/read", post(alerts::mark_read))
        .route("/notify", post(alerts::notify))
}
