//! Route definitions for the `/accuracy` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::accuracy;
use crate::state::AppState;

/// Routes mounted at `/accuracy`.
///
/// ```text
/// GET /  -> detection scoreboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(accuracy::report))
}
