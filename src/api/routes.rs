//! API route configuration.
//!
//! Everything is mounted under `/api/v1`. Privileged routes pass through
//! [`crate::api::middleware::auth`], which accepts a session cookie or the
//! configured bearer token.

use crate::api::handlers::{
    admin_check_handler, change_pass_handler, create_record_handler, delete_record_handler,
    get_all_records_handler, login_handler, logout_handler, purge_all_records_handler,
    search_record_handler, status_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

/// Routes open to anyone.
///
/// # Endpoints
///
/// - `GET  /status`         - Liveness and pool counts
/// - `POST /login`          - Start an admin session
/// - `POST /logout`         - End the admin session
/// - `POST /create_record`  - Shorten a URL
/// - `GET  /search_record`  - Resolve a short key
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(status_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/create_record", post(create_record_handler))
        .route("/search_record", get(search_record_handler))
}

/// Routes that require an admin session or bearer token.
///
/// # Endpoints
///
/// - `GET    /admin_check`        - Confirm the session
/// - `POST   /change_pass`        - Change the admin password
/// - `DELETE /delete_record`      - Delete one record
/// - `GET    /get_all_records`    - List every record
/// - `DELETE /purge_all_records`  - Delete every record
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/admin_check", get(admin_check_handler))
        .route("/change_pass", post(change_pass_handler))
        .route("/delete_record", delete(delete_record_handler))
        .route("/get_all_records", get(get_all_records_handler))
        .route("/purge_all_records", delete(purge_all_records_handler))
}

/// Public and protected routes with the auth layer applied.
pub fn routes(state: AppState) -> Router<AppState> {
    let protected =
        protected_routes().route_layer(middleware::from_fn_with_state(state, auth::layer));

    public_routes().merge(protected)
}
