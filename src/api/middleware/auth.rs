//! Authorization middleware for privileged endpoints.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Admits requests carrying either a valid session cookie or the
/// configured bearer token.
///
/// # Accepted Credentials
///
/// ```text
/// Cookie: session=<expires>.<signature>
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` with message `Log in first!` otherwise.
///
/// # Example
///
/// ```rust,ignore
/// let protected = protected_routes()
///     .route_layer(middleware::from_fn_with_state(state, auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if st.sessions.is_authenticated(req.headers()) {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();
    let bearer = AuthBearer::from_request_parts(&mut parts, &()).await.ok();
    let req = Request::from_parts(parts, body);

    match bearer {
        Some(AuthBearer(token)) if st.auth_service.verify_bearer(&token) => {
            Ok(next.run(req).await)
        }
        _ => Err(AppError::unauthorized(
            "Log in first!",
            json!({ "reason": "Session cookie or bearer token is missing or invalid" }),
        )),
    }
}
