//! Handlers for the `/auth` resource (mock login, register, logout).
//!
//! There is no user store: any email paired with a long-enough password is
//! accepted and receives a signed bearer token. The only rejection the demo
//! login knows is a short password.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use envtrack_core::error::CoreError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Mock credential rule: anything shorter is "invalid".
const MIN_PASSWORD_LEN: usize = 6;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Successful authentication response returned by login and register.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Mock authentication: accepts any email with a password of at least six
/// characters. Returns a bearer token plus user info.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    if input.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    // Display name falls back to the email local part, as the dashboard did.
    let name = input
        .email
        .split('@')
        .next()
        .unwrap_or(input.email.as_str())
        .to_string();

    let response = issue_token(&state, &input.email, &name)?;
    Ok(Json(response))
}

/// POST /api/v1/auth/register
///
/// Same mock rule as login, but with payload validation and an explicit
/// password message. Returns 201 with a token for the "new" user.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.validate()?;

    let response = issue_token(&state, &input.email, &input.name)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/logout
///
/// Tokens are stateless; there is nothing to revoke server-side. Returns
/// 204 so clients can discard their copy.
pub async fn logout(auth_user: AuthUser) -> StatusCode {
    tracing::info!(user_id = %auth_user.user_id, "User logged out");
    StatusCode::NO_CONTENT
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Mint a fresh user id and access token.
fn issue_token(state: &AppState, email: &str, name: &str) -> AppResult<AuthResponse> {
    let user_id = Uuid::new_v4().to_string();

    let access_token = generate_access_token(&user_id, email, name, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user_id,
            email: email.to_string(),
            name: name.to_string(),
        },
    })
}
