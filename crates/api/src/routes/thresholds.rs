//! Route definitions for the `/thresholds` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::thresholds;
use crate::state::AppState;

/// Routes mounted at `/thresholds`.
///
/// ```text
/// GET /         -> list bands
/// PUT /{kind}   -> update one band
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(thresholds::list))
        .route("/{kind}", put(thresholds::update))
}
