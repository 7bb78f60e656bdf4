//! SQLite implementation of the dictionary repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::dictionary_pool;
use super::transaction::{RetryPolicy, TxError, begin_immediate, with_retry};
use crate::domain::entities::{DictionaryWord, PoolStats};
use crate::domain::repositories::DictionaryRepository;
use crate::error::AppError;

pub struct SqliteDictionaryRepository {
    pool: Arc<SqlitePool>,
    retry: RetryPolicy,
}

impl SqliteDictionaryRepository {
    pub fn new(pool: Arc<SqlitePool>, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    async fn try_replace(&self, words: &[String]) -> Result<usize, TxError> {
        let mut tx = begin_immediate(&self.pool).await?;

        dictionary_pool::replace_all(&mut tx, words).await?;
        dictionary_pool::mark_held(&mut *tx).await?;

        let orphaned = dictionary_pool::count_orphaned(&mut *tx).await?;
        if orphaned > 0 {
            return Err(TxError::Orphaned(orphaned));
        }

        let stats = dictionary_pool::stats(&mut *tx).await?;
        tx.commit().await?;

        Ok(usize::try_from(stats.total).unwrap_or_default())
    }
}

#[async_trait]
impl DictionaryRepository for SqliteDictionaryRepository {
    async fn replace_vocabulary(&self, words: Vec<String>) -> Result<usize, AppError> {
        Ok(with_retry(&self.retry, "replace_vocabulary", || self.try_replace(&words)).await?)
    }

    async fn stats(&self) -> Result<PoolStats, AppError> {
        Ok(dictionary_pool::stats(self.pool.as_ref()).await?)
    }

    async fn find_word(&self, word: &str) -> Result<Option<DictionaryWord>, AppError> {
        Ok(dictionary_pool::find(self.pool.as_ref(), word).await?)
    }
}
