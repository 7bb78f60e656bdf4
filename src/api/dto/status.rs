//! DTO for the status endpoint.

use serde::Serialize;

/// Liveness payload with pool and record counts.
#[derive(Debug, Serialize)]
pub struct StatusData {
    pub version: String,
    pub words_total: i64,
    pub words_unused: i64,
    pub records: i64,
}
