//! SQLite implementation of the record repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::transaction::{RetryPolicy, TxError, begin_immediate, with_retry};
use super::{dictionary_pool, mapping_store};
use crate::domain::entities::{Allocation, UrlMapping};
use crate::domain::lookup::{Lookup, LookupField};
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;

/// SQLite repository for mappings and the words they hold.
///
/// Each write is one `BEGIN IMMEDIATE` transaction retried under
/// [`RetryPolicy`] when the database reports contention.
pub struct SqliteRecordRepository {
    pool: Arc<SqlitePool>,
    retry: RetryPolicy,
}

impl SqliteRecordRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    async fn try_allocate(&self, original: &str) -> Result<Allocation, TxError> {
        let mut tx = begin_immediate(&self.pool).await?;

        if let Some(existing) =
            mapping_store::find(&mut *tx, LookupField::Original, original).await?
        {
            return Ok(Allocation::Existing(existing));
        }

        let token = dictionary_pool::draw_unused(&mut tx)
            .await?
            .ok_or(TxError::Exhausted)?;

        let mapping = UrlMapping::new(original, token);
        mapping_store::insert(&mut *tx, &mapping).await?;
        tx.commit().await?;

        Ok(Allocation::Created(mapping))
    }

    async fn try_reclaim_first(&self, lookups: &[Lookup]) -> Result<Option<UrlMapping>, TxError> {
        let mut tx = begin_immediate(&self.pool).await?;

        for lookup in lookups {
            let Some(mapping) = mapping_store::find(&mut *tx, lookup.field, &lookup.key).await?
            else {
                continue;
            };

            mapping_store::remove(&mut *tx, &mapping.token).await?;
            dictionary_pool::release(&mut *tx, &mapping.token).await?;
            tx.commit().await?;

            return Ok(Some(mapping));
        }

        Ok(None)
    }

    async fn try_purge(&self) -> Result<u64, TxError> {
        let mut tx = begin_immediate(&self.pool).await?;

        let removed = mapping_store::remove_all(&mut *tx).await?;
        dictionary_pool::reset_all(&mut *tx).await?;
        tx.commit().await?;

        Ok(removed)
    }
}

#[async_trait]
impl RecordRepository for SqliteRecordRepository {
    async fn allocate(&self, original: &str) -> Result<Allocation, AppError> {
        Ok(with_retry(&self.retry, "allocate", || self.try_allocate(original)).await?)
    }

    async fn find(&self, field: LookupField, key: &str) -> Result<Option<UrlMapping>, AppError> {
        Ok(mapping_store::find(self.pool.as_ref(), field, key).await?)
    }

    async fn reclaim_first(&self, lookups: &[Lookup]) -> Result<Option<UrlMapping>, AppError> {
        if lookups.is_empty() {
            return Ok(None);
        }

        Ok(with_retry(&self.retry, "reclaim", || self.try_reclaim_first(lookups)).await?)
    }

    async fn purge(&self) -> Result<u64, AppError> {
        Ok(with_retry(&self.retry, "purge", || self.try_purge()).await?)
    }

    async fn list_all(&self) -> Result<Vec<UrlMapping>, AppError> {
        Ok(mapping_store::list_all(self.pool.as_ref()).await?)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(mapping_store::count(self.pool.as_ref()).await?)
    }
}
