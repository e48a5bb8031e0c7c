//! Handlers for the `/thresholds` resource (alert band settings).

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use envtrack_core::sensor::SensorKind;
use envtrack_core::threshold::Threshold;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// One sensor's band, as the settings page shows it.
#[derive(Debug, Serialize)]
pub struct ThresholdEntry {
    pub sensor: SensorKind,
    pub min: f64,
    pub max: f64,
}

impl From<(SensorKind, Threshold)> for ThresholdEntry {
    fn from((sensor, band): (SensorKind, Threshold)) -> Self {
        Self {
            sensor,
            min: band.min,
            max: band.max,
        }
    }
}

/// GET /api/v1/thresholds
///
/// Current band per sensor kind.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ThresholdEntry>>>> {
    let entries = state
        .monitor
        .thresholds()
        .await
        .into_iter()
        .map(ThresholdEntry::from)
        .collect();
    Ok(Json(DataResponse { data: entries }))
}

/// PUT /api/v1/thresholds/{kind}
///
/// Replace one kind's band. Alerts created earlier keep the range snapshot
/// they were recorded with.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(kind): Path<SensorKind>,
    Json(band): Json<Threshold>,
) -> AppResult<Json<DataResponse<ThresholdEntry>>> {
    let updated = state.monitor.update_threshold(kind, band).await?;
    Ok(Json(DataResponse {
        data: ThresholdEntry::from((kind, updated)),
    }))
}
