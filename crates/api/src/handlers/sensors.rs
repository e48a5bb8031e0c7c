//! Handlers for the `/sensors` resource (current readings and history).

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use envtrack_core::reading::Reading;
use envtrack_core::sensor::SensorKind;

use crate::engine::SensorSnapshot;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// How many hours of history to return (default: 24).
    pub hours: Option<i64>,
}

/// GET /api/v1/sensors/current
///
/// Latest reading per sensor kind with normal/warning/critical status.
pub async fn current(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<SensorSnapshot>>>> {
    let snapshots = state.monitor.current().await;
    Ok(Json(DataResponse { data: snapshots }))
}

/// GET /api/v1/sensors/{kind}/history
///
/// Retained readings for one sensor kind, oldest first. The window is
/// bounded by the dashboard's largest view (30 days).
pub async fn history(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(kind): Path<SensorKind>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<DataResponse<Vec<Reading>>>> {
    let hours = query.hours.unwrap_or(24);
    if !(1..=720).contains(&hours) {
        return Err(AppError::BadRequest(
            "hours must be between 1 and 720".to_string(),
        ));
    }

    let readings = state.monitor.history(kind, hours).await;
    Ok(Json(DataResponse { data: readings }))
}
