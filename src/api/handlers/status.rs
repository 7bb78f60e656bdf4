//! Handler for the status endpoint.

use axum::extract::State;

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::status::StatusData;
use crate::error::AppError;
use crate::state::AppState;

/// Reports liveness together with pool and record counts.
///
/// # Endpoint
///
/// `GET /api/v1/status`
///
/// # Response
///
/// ```json
/// {
///   "status": true,
///   "message": "It's alive!",
///   "data": { "version": "0.1.0", "words_total": 2, "words_unused": 1, "records": 1 }
/// }
/// ```
pub async fn status_handler(
    State(state): State<AppState>,
) -> Result<ApiResponse<StatusData>, AppError> {
    let stats = state.dictionary_service.stats().await?;
    let records = state.record_service.count().await?;

    Ok(ApiResponse::ok(
        "It's alive!",
        StatusData {
            version: env!("CARGO_PKG_VERSION").to_string(),
            words_total: stats.total,
            words_unused: stats.unused,
            records,
        },
    ))
}
