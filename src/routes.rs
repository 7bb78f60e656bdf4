//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/api/v1/*` - JSON API (see [`crate::api::routes`])
//! - anything else - static frontend from `FRONTEND_DIR`, if configured
//!
//! # Middleware
//!
//! - **CORS** - Configured origins, or the request origin mirrored back, with credentials
//! - **Tracing** - Structured request/response logging

use crate::api;
use crate::api::middleware::tracing;
use crate::config::Config;
use crate::state::AppState;
use axum::Router;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;

/// Builds the CORS policy.
///
/// Cookies must cross origins for the frontend to keep its session, so
/// credentials are allowed and the origin is never a wildcard.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    ::tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `config` - CORS origins and the optional frontend directory
pub fn app_router(state: AppState, config: &Config) -> Router {
    let mut router = Router::new()
        .nest("/api/v1", api::routes::routes(state.clone()))
        .with_state(state);

    if let Some(ref dir) = config.frontend_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(cors_layer(&config.allowed_origins))
        .layer(tracing::layer())
}
