//! Dictionary pool lifecycle.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::PoolStats;
use crate::domain::repositories::DictionaryRepository;
use crate::error::AppError;
use crate::utils::vocabulary;

/// Service for loading and inspecting the token vocabulary.
pub struct DictionaryService<D: DictionaryRepository> {
    repository: Arc<D>,
}

impl<D: DictionaryRepository> DictionaryService<D> {
    pub fn new(repository: Arc<D>) -> Self {
        Self { repository }
    }

    /// Sanitizes `words` and replaces the pool with the result.
    ///
    /// Words held by live records stay marked used.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if nothing survives sanitization
    /// or a live token is missing from the new vocabulary.
    pub async fn load_vocabulary<I, S>(&self, words: I) -> Result<usize, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = vocabulary::sanitize(words);
        if words.is_empty() {
            return Err(AppError::configuration(
                "Vocabulary is empty after sanitization",
                json!({}),
            ));
        }

        let loaded = self.repository.replace_vocabulary(words).await?;
        tracing::info!(words = loaded, "Vocabulary loaded");

        Ok(loaded)
    }

    /// Reads a newline-separated word list from `path` and loads it.
    pub async fn load_file(&self, path: &Path) -> Result<usize, AppError> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::configuration(
                "Failed to read dictionary file",
                json!({ "path": path.display().to_string(), "reason": e.to_string() }),
            )
        })?;

        self.load_vocabulary(contents.lines()).await
    }

    /// Loads `path` only if the pool is empty. Returns the pool afterwards.
    pub async fn ensure_loaded(&self, path: &Path) -> Result<PoolStats, AppError> {
        let stats = self.repository.stats().await?;
        if stats.total > 0 {
            tracing::info!(
                total = stats.total,
                unused = stats.unused,
                "Dictionary already loaded"
            );
            return Ok(stats);
        }

        tracing::info!(path = %path.display(), "Dictionary empty, loading vocabulary");
        self.load_file(path).await?;
        self.repository.stats().await
    }

    pub async fn stats(&self) -> Result<PoolStats, AppError> {
        self.repository.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockDictionaryRepository;

    #[tokio::test]
    async fn test_load_vocabulary_sanitizes() {
        let mut mock_repo = MockDictionaryRepository::new();

        mock_repo
            .expect_replace_vocabulary()
            .withf(|words| words == &vec!["apple".to_string(), "banana".to_string()])
            .times(1)
            .returning(|words| Ok(words.len()));

        let service = DictionaryService::new(Arc::new(mock_repo));
        let loaded = service
            .load_vocabulary(["banana", "admin", "apple", "apple", "no-dash", ""])
            .await
            .unwrap();

        assert_eq!(loaded, 2);
    }

    #[tokio::test]
    async fn test_load_vocabulary_rejects_empty_result() {
        let mut mock_repo = MockDictionaryRepository::new();
        mock_repo.expect_replace_vocabulary().times(0);

        let service = DictionaryService::new(Arc::new(mock_repo));
        let result = service.load_vocabulary(["login", "api", "!!"]).await;

        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_load_file_missing_is_configuration_error() {
        let mock_repo = MockDictionaryRepository::new();
        let service = DictionaryService::new(Arc::new(mock_repo));

        let result = service
            .load_file(Path::new("/nonexistent/wordlink/dictionary.txt"))
            .await;

        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_ensure_loaded_skips_populated_pool() {
        let mut mock_repo = MockDictionaryRepository::new();

        mock_repo
            .expect_stats()
            .times(1)
            .returning(|| Ok(PoolStats { total: 2, unused: 1 }));
        mock_repo.expect_replace_vocabulary().times(0);

        let service = DictionaryService::new(Arc::new(mock_repo));
        let stats = service
            .ensure_loaded(Path::new("/nonexistent/wordlink/dictionary.txt"))
            .await
            .unwrap();

        assert_eq!(stats.total, 2);
    }
}
