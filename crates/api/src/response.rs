//! Shared response envelope types for API handlers.
//!
//! All collection/detail responses use a `{ "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! to get compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Acknowledgement payload for the alert-notify endpoint: a human-readable
/// message plus the delivery id.
#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub message: &'static str,
    pub id: String,
}
