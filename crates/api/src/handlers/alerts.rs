//! Handlers for the `/alerts` resource: the alert log plus the
//! email-notification endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use envtrack_core::alert::Alert;
use envtrack_core::sensor::SensorKind;

use envtrack_events::delivery::AlertEmail;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, NotifyResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /alerts/notify`, the payload shape dashboard
/// clients post.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest {
    #[validate(length(min = 1, message = "sensorType is required"))]
    pub sensor_type: String,
    pub value: f64,
    #[validate(length(min = 1, message = "expectedRange is required"))]
    pub expected_range: String,
    #[validate(length(min = 1, message = "timestamp is required"))]
    pub timestamp: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/alerts
///
/// All retained alerts, newest first.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Alert>>>> {
    let alerts = state.monitor.alerts().await;
    Ok(Json(DataResponse { data: alerts }))
}

/// POST /api/v1/alerts/{id}/read
///
/// Flip one alert's read flag. Idempotent.
pub async fn mark_read(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<Alert>>> {
    let alert = state.monitor.mark_alert_read(id).await?;
    Ok(Json(DataResponse { data: alert }))
}

/// DELETE /api/v1/alerts
///
/// Clear the whole log. Returns 204.
pub async fn clear(State(state): State<AppState>, _user: AuthUser) -> AppResult<StatusCode> {
    state.monitor.clear_alerts().await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/alerts/notify
///
/// Send an alert email for the supplied payload. Returns `{message, id}`
/// on success; delivery failures (including unconfigured SMTP) surface as
/// a 500 error payload.
pub async fn notify(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<NotifyRequest>,
) -> AppResult<Json<NotifyResponse>> {
    input.validate()?;

    let mailer = state.mailer.as_ref().ok_or_else(|| {
        AppError::InternalError("Failed to send alert email: delivery is not configured".into())
    })?;

    // Prefer the canonical label when the payload names a known kind.
    let sensor = input
        .sensor_type
        .parse::<SensorKind>()
        .map(|k| k.label().to_string())
        .unwrap_or_else(|_| input.sensor_type.clone());

    let email = AlertEmail {
        sensor,
        value: input.value,
        expected_range: input.expected_range,
        timestamp: input.timestamp,
    };

    mailer
        .deliver(&email)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to send alert email: {e}")))?;

    Ok(Json(NotifyResponse {
        message: "Alert email sent successfully",
        id: Uuid::new_v4().to_string(),
    }))
}
