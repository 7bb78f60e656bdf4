//! Record allocation, resolution and reclamation.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::Allocation;
use crate::domain::lookup::LookupField;
use crate::domain::matching::InputMatcher;
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;
use crate::utils::url_normalizer::ensure_protocol;

/// Service for shortening, resolving and deleting records.
///
/// Callers are expected to have made the authorization decision before
/// invoking [`Self::delete_by_input`], [`Self::list_all`] or
/// [`Self::purge_all`]; the service itself checks nothing.
pub struct RecordService<R: RecordRepository> {
    repository: Arc<R>,
    matcher: InputMatcher,
}

impl<R: RecordRepository> RecordService<R> {
    pub fn new(repository: Arc<R>, matcher: InputMatcher) -> Self {
        Self {
            repository,
            matcher,
        }
    }

    /// Shortens `url`, reusing the existing token if the normalized URL is
    /// already mapped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `url` is blank.
    /// Returns [`AppError::PoolExhausted`] if no unused word is left.
    /// Returns [`AppError::Conflict`] if contention outlasts every retry.
    pub async fn shorten(&self, url: &str) -> Result<Allocation, AppError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::bad_request(
                "URL must not be empty",
                json!({ "field": "url" }),
            ));
        }

        let original = ensure_protocol(url);

        match self.repository.allocate(&original).await {
            Ok(allocation) => {
                let mapping = allocation.mapping();
                if allocation.is_new() {
                    metrics::counter!("wordlink_records_created_total").increment(1);
                    tracing::info!(original = %mapping.original, token = %mapping.token, "Record created");
                } else {
                    metrics::counter!("wordlink_records_reused_total").increment(1);
                    tracing::debug!(original = %mapping.original, token = %mapping.token, "Record reused");
                }
                Ok(allocation)
            }
            Err(e @ AppError::PoolExhausted { .. }) => {
                metrics::counter!("wordlink_pool_exhausted_total").increment(1);
                tracing::warn!(original = %original, "Dictionary pool exhausted");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Looks up the record whose `by` field equals `key` and returns its
    /// `want` field.
    ///
    /// Keys matched against [`LookupField::Original`] are normalized first.
    pub async fn resolve(
        &self,
        key: &str,
        by: LookupField,
        want: LookupField,
    ) -> Result<Option<String>, AppError> {
        let key = match by {
            LookupField::Original => ensure_protocol(key.trim()),
            LookupField::Token => key.trim().to_string(),
        };

        let mapping = self.repository.find(by, &key).await?;
        Ok(mapping.map(|mapping| want.select(&mapping).to_string()))
    }

    /// Resolves a token to its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record holds `token`.
    pub async fn resolve_short_to_original(&self, token: &str) -> Result<String, AppError> {
        self.resolve(token, LookupField::Token, LookupField::Original)
            .await?
            .ok_or_else(|| AppError::not_found("No matching record!", json!({ "short_key": token })))
    }

    /// Deletes the record matched by `raw` and returns its token to the pool.
    ///
    /// Accepts a bare token, a short URL or the original URL, each with or
    /// without protocol. Returns false if nothing matched.
    pub async fn delete_by_input(&self, raw: &str) -> Result<bool, AppError> {
        let candidates = self.matcher.candidates(raw);

        match self.repository.reclaim_first(&candidates).await? {
            Some(mapping) => {
                metrics::counter!("wordlink_records_reclaimed_total").increment(1);
                tracing::info!(original = %mapping.original, token = %mapping.token, "Record deleted");
                Ok(true)
            }
            None => {
                tracing::debug!(input = raw, "No record matched deletion input");
                Ok(false)
            }
        }
    }

    /// Returns every record as original URL to token.
    pub async fn list_all(&self) -> Result<BTreeMap<String, String>, AppError> {
        let mappings = self.repository.list_all().await?;

        Ok(mappings
            .into_iter()
            .map(|mapping| (mapping.original, mapping.token))
            .collect())
    }

    /// Deletes every record and marks every word unused.
    pub async fn purge_all(&self) -> Result<u64, AppError> {
        let removed = self.repository.purge().await?;

        metrics::counter!("wordlink_purges_total").increment(1);
        tracing::warn!(removed, "All records purged");

        Ok(removed)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlMapping;
    use crate::domain::lookup::Lookup;
    use crate::domain::repositories::MockRecordRepository;

    fn service(repo: MockRecordRepository) -> RecordService<MockRecordRepository> {
        RecordService::new(Arc::new(repo), InputMatcher::default())
    }

    #[tokio::test]
    async fn test_shorten_normalizes_url() {
        let mut mock_repo = MockRecordRepository::new();

        mock_repo
            .expect_allocate()
            .withf(|original| original == "https://example.com")
            .times(1)
            .returning(|original| Ok(Allocation::Created(UrlMapping::new(original, "apple"))));

        let allocation = service(mock_repo).shorten("example.com").await.unwrap();

        assert!(allocation.is_new());
        assert_eq!(allocation.mapping().token, "apple");
        assert_eq!(allocation.mapping().original, "https://example.com");
    }

    #[tokio::test]
    async fn test_shorten_keeps_existing_protocol() {
        let mut mock_repo = MockRecordRepository::new();

        mock_repo
            .expect_allocate()
            .withf(|original| original == "http://example.com")
            .times(1)
            .returning(|original| Ok(Allocation::Existing(UrlMapping::new(original, "apple"))));

        let allocation = service(mock_repo).shorten(" http://example.com ").await.unwrap();
        assert!(!allocation.is_new());
    }

    #[tokio::test]
    async fn test_shorten_rejects_blank_url() {
        let mut mock_repo = MockRecordRepository::new();
        mock_repo.expect_allocate().times(0);

        let result = service(mock_repo).shorten("   ").await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_shorten_propagates_pool_exhausted() {
        let mut mock_repo = MockRecordRepository::new();

        mock_repo
            .expect_allocate()
            .times(1)
            .returning(|_| Err(AppError::pool_exhausted("No words", json!({}))));

        let result = service(mock_repo).shorten("other.com").await;
        assert!(matches!(result, Err(AppError::PoolExhausted { .. })));
    }

    #[tokio::test]
    async fn test_resolve_short_to_original() {
        let mut mock_repo = MockRecordRepository::new();

        mock_repo
            .expect_find()
            .withf(|field, key| *field == LookupField::Token && key == "apple")
            .times(1)
            .returning(|_, _| Ok(Some(UrlMapping::new("https://example.com", "apple"))));

        let original = service(mock_repo)
            .resolve_short_to_original("apple")
            .await
            .unwrap();

        assert_eq!(original, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_short_to_original_not_found() {
        let mut mock_repo = MockRecordRepository::new();
        mock_repo.expect_find().returning(|_, _| Ok(None));

        let result = service(mock_repo).resolve_short_to_original("pear").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_by_original_normalizes_key() {
        let mut mock_repo = MockRecordRepository::new();

        mock_repo
            .expect_find()
            .withf(|field, key| *field == LookupField::Original && key == "https://example.com")
            .times(1)
            .returning(|_, _| Ok(Some(UrlMapping::new("https://example.com", "apple"))));

        let token = service(mock_repo)
            .resolve("example.com", LookupField::Original, LookupField::Token)
            .await
            .unwrap();

        assert_eq!(token.as_deref(), Some("apple"));
    }

    #[tokio::test]
    async fn test_delete_by_input_passes_ordered_candidates() {
        let mut mock_repo = MockRecordRepository::new();

        mock_repo
            .expect_reclaim_first()
            .withf(|lookups| {
                lookups
                    == [
                        Lookup::original("https://apple"),
                        Lookup::original("apple"),
                        Lookup::token("apple"),
                    ]
            })
            .times(1)
            .returning(|_| Ok(Some(UrlMapping::new("https://example.com", "apple"))));

        assert!(service(mock_repo).delete_by_input("/apple").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_by_input_no_match() {
        let mut mock_repo = MockRecordRepository::new();
        mock_repo.expect_reclaim_first().returning(|_| Ok(None));

        assert!(!service(mock_repo).delete_by_input("pear").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_all_maps_original_to_token() {
        let mut mock_repo = MockRecordRepository::new();

        mock_repo.expect_list_all().times(1).returning(|| {
            Ok(vec![
                UrlMapping::new("https://a.com", "apple"),
                UrlMapping::new("https://b.com", "banana"),
            ])
        });

        let records = service(mock_repo).list_all().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records["https://a.com"], "apple");
        assert_eq!(records["https://b.com"], "banana");
    }

    #[tokio::test]
    async fn test_purge_all() {
        let mut mock_repo = MockRecordRepository::new();
        mock_repo.expect_purge().times(1).returning(|| Ok(3));

        assert_eq!(service(mock_repo).purge_all().await.unwrap(), 3);
    }
}
