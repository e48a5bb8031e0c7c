//! Handler for the `/accuracy` scoreboard.

use axum::extract::State;
use axum::Json;

use envtrack_core::accuracy::AccuracyReport;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/accuracy
///
/// Confusion-matrix counters and the metrics derived from them.
pub async fn report(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<AccuracyReport>>> {
    let report = state.monitor.accuracy().await;
    Ok(Json(DataResponse { data: report }))
}
