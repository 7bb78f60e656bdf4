//! Repository trait for the dictionary pool.

use crate::domain::entities::{DictionaryWord, PoolStats};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for loading and inspecting the token vocabulary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DictionaryRepository: Send + Sync {
    /// Replaces the vocabulary with `words`, keeping the used flag of every
    /// word a live mapping still holds. Returns the number of words stored.
    ///
    /// `words` must already be sanitized and deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if a live token is missing from
    /// `words`; nothing is changed in that case.
    /// Returns [`AppError::Internal`] on database errors.
    async fn replace_vocabulary(&self, words: Vec<String>) -> Result<usize, AppError>;

    /// Returns total and unused word counts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn stats(&self) -> Result<PoolStats, AppError>;

    /// Looks up a single word.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_word(&self, word: &str) -> Result<Option<DictionaryWord>, AppError>;
}
