//! DTOs for record endpoints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Form body of `POST /create_record`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecordForm {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,
}

/// Query of `GET /search_record`.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchRecordQuery {
    #[validate(length(min = 1, max = 128, message = "Short key must be 1-128 characters"))]
    pub short_key: String,
}

/// Form body of `DELETE /delete_record`.
///
/// `url` may be a token, a short URL or the original URL.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteRecordForm {
    #[validate(length(min = 1, max = 2048, message = "Input must be 1-2048 characters"))]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ShortenedData {
    pub shortened_key: String,
}

#[derive(Debug, Serialize)]
pub struct SearchData {
    pub original_url: String,
}

/// Original URL to token.
#[derive(Debug, Serialize)]
pub struct RecordsData {
    pub records: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct PurgeData {
    pub removed: u64,
}
