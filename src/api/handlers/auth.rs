//! Handlers for login, logout and password management.

use axum::{
    Form,
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{ChangePasswordForm, LoginForm};
use crate::api::dto::envelope::ApiResponse;
use crate::api::middleware::session::SessionSigner;
use crate::error::AppError;
use crate::state::AppState;

/// Checks credentials and starts an admin session.
///
/// # Endpoint
///
/// `POST /api/v1/login` (form: `username`, `password`)
///
/// # Response Codes
///
/// - **200 OK**: `Set-Cookie: session=...`
/// - **401 Unauthorized**: invalid credentials; any session cookie is cleared
pub async fn login_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    form.validate()?;

    let valid = state
        .auth_service
        .verify_credentials(&form.username, &form.password)
        .await?;

    if !valid {
        tracing::warn!(username = %form.username, "Failed login attempt");
        return Ok((
            [(SET_COOKIE, SessionSigner::clear_cookie())],
            AppError::unauthorized("Invalid credentials!", json!({})),
        )
            .into_response());
    }

    let session = state.sessions.issue();
    tracing::info!(username = %form.username, "Administrator logged in");

    Ok((
        [(SET_COOKIE, state.sessions.set_cookie(&session))],
        ApiResponse::message("Logged in!"),
    )
        .into_response())
}

/// `POST /api/v1/logout`
pub async fn logout_handler() -> impl IntoResponse {
    (
        [(SET_COOKIE, SessionSigner::clear_cookie())],
        ApiResponse::message("Logged out!"),
    )
}

/// `GET /api/v1/admin_check`, reachable only through the auth layer.
pub async fn admin_check_handler() -> ApiResponse<()> {
    ApiResponse::message("User permitted!")
}

/// Replaces the administrator password.
///
/// # Endpoint
///
/// `POST /api/v1/change_pass` (form: `new_pass`)
pub async fn change_pass_handler(
    State(state): State<AppState>,
    Form(form): Form<ChangePasswordForm>,
) -> Result<ApiResponse<()>, AppError> {
    form.validate()?;

    state.auth_service.change_password(&form.new_pass).await?;

    Ok(ApiResponse::message("Password changed!"))
}
