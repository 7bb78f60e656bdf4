//! Queries over the `dictionary` table.
//!
//! Functions take an executor so they compose inside a caller's transaction.
//! None of them open a transaction of their own.

use rand::Rng;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqliteExecutor};

use crate::domain::entities::{DictionaryWord, PoolStats};

const INSERT_CHUNK: usize = 500;

pub async fn count_unused<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM dictionary WHERE used = 0")
        .fetch_one(executor)
        .await
}

pub async fn stats<'e, E>(executor: E) -> Result<PoolStats, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let (total, unused): (i64, Option<i64>) = sqlx::query_as(
        "SELECT COUNT(*), SUM(CASE WHEN used = 0 THEN 1 ELSE 0 END) FROM dictionary",
    )
    .fetch_one(executor)
    .await?;

    Ok(PoolStats {
        total,
        unused: unused.unwrap_or(0),
    })
}

pub async fn find<'e, E>(executor: E, word: &str) -> Result<Option<DictionaryWord>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let row: Option<(String, bool)> =
        sqlx::query_as("SELECT word, used FROM dictionary WHERE word = ?")
            .bind(word)
            .fetch_optional(executor)
            .await?;

    Ok(row.map(|(word, used)| DictionaryWord::new(word, used)))
}

/// Picks an unused word uniformly at random and marks it used.
///
/// Returns `None` when every word is taken. Must run inside a write
/// transaction so the count and the pick see the same snapshot.
pub async fn draw_unused(conn: &mut SqliteConnection) -> Result<Option<String>, sqlx::Error> {
    let unused = count_unused(&mut *conn).await?;
    if unused == 0 {
        return Ok(None);
    }

    let offset = rand::rng().random_range(0..unused);

    let word: String = sqlx::query_scalar(
        "SELECT word FROM dictionary WHERE used = 0 ORDER BY word LIMIT 1 OFFSET ?",
    )
    .bind(offset)
    .fetch_one(&mut *conn)
    .await?;

    let marked = sqlx::query("UPDATE dictionary SET used = 1 WHERE word = ? AND used = 0")
        .bind(&word)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    if marked != 1 {
        return Err(sqlx::Error::Protocol(format!(
            "word {word} changed state during draw"
        )));
    }

    Ok(Some(word))
}

/// Marks `word` unused again.
pub async fn release<'e, E>(executor: E, word: &str) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let released = sqlx::query("UPDATE dictionary SET used = 0 WHERE word = ? AND used = 1")
        .bind(word)
        .execute(executor)
        .await?
        .rows_affected();

    if released == 0 {
        tracing::warn!(word, "Released word was not marked used");
    }

    Ok(())
}

/// Marks every word unused. Returns the number of words changed.
pub async fn reset_all<'e, E>(executor: E) -> Result<u64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    Ok(sqlx::query("UPDATE dictionary SET used = 0 WHERE used = 1")
        .execute(executor)
        .await?
        .rows_affected())
}

/// Replaces the whole table with `words`, all unused.
pub async fn replace_all(conn: &mut SqliteConnection, words: &[String]) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM dictionary")
        .execute(&mut *conn)
        .await?;

    for chunk in words.chunks(INSERT_CHUNK) {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("INSERT OR IGNORE INTO dictionary (word) ");
        builder.push_values(chunk, |mut row, word| {
            row.push_bind(word.as_str());
        });
        builder.build().execute(&mut *conn).await?;
    }

    Ok(())
}

/// Marks every word a live mapping holds as used.
pub async fn mark_held<'e, E>(executor: E) -> Result<u64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    Ok(sqlx::query(
        "UPDATE dictionary SET used = 1 WHERE used = 0 AND word IN (SELECT token FROM mappings)",
    )
    .execute(executor)
    .await?
    .rows_affected())
}

/// Counts live tokens that have no dictionary row.
pub async fn count_orphaned<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM mappings WHERE token NOT IN (SELECT word FROM dictionary)",
    )
    .fetch_one(executor)
    .await
}
