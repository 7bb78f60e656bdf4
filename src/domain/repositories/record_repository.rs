//! Repository trait for URL mappings and the words they consume.

use crate::domain::entities::{Allocation, UrlMapping};
use crate::domain::lookup::{Lookup, LookupField};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the mapping store together with the dictionary
/// pool it draws from.
///
/// Every mutating operation runs as one serializable transaction that either
/// fully commits or leaves no trace, so a word is marked used exactly when a
/// mapping holds it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteRecordRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Returns the mapping for `original`, creating it from a uniformly drawn
    /// unused word when none exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PoolExhausted`] if no unused word is left.
    /// Returns [`AppError::Conflict`] if contention outlasts every retry.
    /// Returns [`AppError::Internal`] on database errors.
    async fn allocate(&self, original: &str) -> Result<Allocation, AppError>;

    /// Finds the mapping whose `field` equals `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, field: LookupField, key: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Deletes the first mapping matched by `lookups`, tried in order, and
    /// returns its word to the pool.
    ///
    /// Returns `None` when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if contention outlasts every retry.
    /// Returns [`AppError::Internal`] on database errors.
    async fn reclaim_first(&self, lookups: &[Lookup]) -> Result<Option<UrlMapping>, AppError>;

    /// Deletes every mapping and marks every word unused. Returns the number
    /// of mappings removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if contention outlasts every retry.
    /// Returns [`AppError::Internal`] on database errors.
    async fn purge(&self) -> Result<u64, AppError>;

    /// Lists every mapping ordered by original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_all(&self) -> Result<Vec<UrlMapping>, AppError>;

    /// Counts live mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
