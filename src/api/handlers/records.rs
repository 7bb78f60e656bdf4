//! Handlers for creating, resolving, listing and deleting records.

use axum::{
    Form,
    extract::{Query, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::record::{
    CreateRecordForm, DeleteRecordForm, PurgeData, RecordsData, SearchData, SearchRecordQuery,
    ShortenedData,
};
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL.
///
/// # Endpoint
///
/// `POST /api/v1/create_record` (form: `url`)
///
/// Submitting an already shortened URL returns its existing key.
///
/// # Response Codes
///
/// - **200 OK**: `{"shortened_key": "apple"}`
/// - **400 Bad Request**: empty or oversized URL
/// - **503 Service Unavailable**: dictionary exhausted
pub async fn create_record_handler(
    State(state): State<AppState>,
    Form(form): Form<CreateRecordForm>,
) -> Result<ApiResponse<ShortenedData>, AppError> {
    form.validate()?;

    let allocation = state.record_service.shorten(&form.url).await?;

    Ok(ApiResponse::ok(
        "Record created!",
        ShortenedData {
            shortened_key: allocation.into_mapping().token,
        },
    ))
}

/// Resolves a short key to its original URL.
///
/// # Endpoint
///
/// `GET /api/v1/search_record?short_key=apple`
///
/// # Response Codes
///
/// - **200 OK**: `{"original_url": "https://example.com"}`
/// - **404 Not Found**: no record holds the key
pub async fn search_record_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchRecordQuery>,
) -> Result<ApiResponse<SearchData>, AppError> {
    query.validate()?;

    let original_url = state
        .record_service
        .resolve_short_to_original(&query.short_key)
        .await?;

    Ok(ApiResponse::ok("Success!", SearchData { original_url }))
}

/// Deletes a record and returns its key to the dictionary.
///
/// # Endpoint
///
/// `DELETE /api/v1/delete_record` (form: `url`)
///
/// `url` may be the key, a short URL or the original URL, with or without
/// protocol.
pub async fn delete_record_handler(
    State(state): State<AppState>,
    Form(form): Form<DeleteRecordForm>,
) -> Result<ApiResponse<()>, AppError> {
    form.validate()?;

    if state.record_service.delete_by_input(&form.url).await? {
        Ok(ApiResponse::message("Success!"))
    } else {
        Err(AppError::not_found(
            "No matching record!",
            json!({ "input": form.url }),
        ))
    }
}

/// `GET /api/v1/get_all_records`
pub async fn get_all_records_handler(
    State(state): State<AppState>,
) -> Result<ApiResponse<RecordsData>, AppError> {
    let records = state.record_service.list_all().await?;

    Ok(ApiResponse::ok("Success!", RecordsData { records }))
}

/// `DELETE /api/v1/purge_all_records`
pub async fn purge_all_records_handler(
    State(state): State<AppState>,
) -> Result<ApiResponse<PurgeData>, AppError> {
    let removed = state.record_service.purge_all().await?;

    Ok(ApiResponse::ok("All records deleted!", PurgeData { removed }))
}
