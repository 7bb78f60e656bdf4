//! Serializable write transactions with bounded retry.
//!
//! Writers open the transaction with `BEGIN IMMEDIATE`, which takes the
//! database write lock up front. Two writers therefore never interleave a
//! read-then-write sequence, and a writer that cannot get the lock fails
//! with `SQLITE_BUSY` instead of deadlocking mid-transaction. Those failures
//! are retried with jittered exponential backoff.

use std::future::Future;
use std::time::Duration;

use serde_json::json;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::error::AppError;

const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

const MAX_BACKOFF: Duration = Duration::from_millis(250);

/// Failure inside a transactional unit of work.
#[derive(Debug, thiserror::Error)]
pub enum TxError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("no unused words left in the dictionary")]
    Exhausted,
    #[error("{0} live tokens are missing from the vocabulary")]
    Orphaned(i64),
}

impl TxError {
    /// Returns true if a fresh attempt might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            TxError::Database(e) => is_contention(e),
            TxError::Exhausted | TxError::Orphaned(_) => false,
        }
    }
}

/// Lock contention or a uniqueness race lost to a concurrent writer.
pub fn is_contention(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if db_err.is_unique_violation() {
        return true;
    }

    // Extended result codes keep the primary code in the low byte.
    db_err
        .code()
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
}

impl From<TxError> for AppError {
    fn from(e: TxError) -> Self {
        match e {
            TxError::Exhausted => AppError::pool_exhausted(
                "No unused words left in the dictionary",
                json!({}),
            ),
            TxError::Orphaned(missing) => AppError::configuration(
                "Vocabulary is missing tokens held by live records",
                json!({ "missing": missing }),
            ),
            TxError::Database(e) if is_contention(&e) => {
                tracing::warn!(error = %e, "Transaction retries exhausted");
                AppError::conflict("Database is busy, try again", json!({}))
            }
            TxError::Database(e) => AppError::from(e),
        }
    }
}

/// How many times a contended transaction is attempted, and how long to wait
/// between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            base_delay_ms: 5,
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            attempts: attempts.max(1),
            base_delay_ms,
        }
    }

    /// Delays between attempts: `base * 2^n`, capped and jittered.
    pub fn strategy(&self) -> impl Iterator<Item = Duration> + Send + 'static {
        ExponentialBackoff::from_millis(2)
            .factor(self.base_delay_ms.max(1))
            .max_delay(MAX_BACKOFF)
            .map(jitter)
            .take(self.attempts.saturating_sub(1) as usize)
    }
}

/// Opens a write transaction holding the database write lock.
pub async fn begin_immediate(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Runs `action` until it succeeds, fails with a non-retryable error, or the
/// policy runs out of attempts.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    action: F,
) -> Result<T, TxError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TxError>>,
{
    let mut attempt = 1u32;

    RetryIf::spawn(policy.strategy(), action, move |e: &TxError| {
        let retry = e.is_retryable();
        if retry {
            tracing::debug!(operation, attempt, error = %e, "Transaction contended, retrying");
            metrics::counter!("wordlink_tx_retries_total", "operation" => operation).increment(1);
            attempt += 1;
        }
        retry
    })
    .await
}
