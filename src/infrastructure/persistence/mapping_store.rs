//! Queries over the `mappings` table.

use sqlx::SqliteExecutor;

use crate::domain::entities::UrlMapping;
use crate::domain::lookup::LookupField;

fn into_mapping((original, token): (String, String)) -> UrlMapping {
    UrlMapping::new(original, token)
}

pub async fn find<'e, E>(
    executor: E,
    field: LookupField,
    key: &str,
) -> Result<Option<UrlMapping>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = match field {
        LookupField::Original => "SELECT original, token FROM mappings WHERE original = ?",
        LookupField::Token => "SELECT original, token FROM mappings WHERE token = ?",
    };

    let row: Option<(String, String)> = sqlx::query_as(sql)
        .bind(key)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(into_mapping))
}

pub async fn insert<'e, E>(executor: E, mapping: &UrlMapping) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("INSERT INTO mappings (original, token) VALUES (?, ?)")
        .bind(&mapping.original)
        .bind(&mapping.token)
        .execute(executor)
        .await?;

    Ok(())
}

/// Deletes the mapping holding `token`. Returns true if a row was removed.
pub async fn remove<'e, E>(executor: E, token: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let removed = sqlx::query("DELETE FROM mappings WHERE token = ?")
        .bind(token)
        .execute(executor)
        .await?
        .rows_affected();

    Ok(removed > 0)
}

pub async fn remove_all<'e, E>(executor: E) -> Result<u64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    Ok(sqlx::query("DELETE FROM mappings")
        .execute(executor)
        .await?
        .rows_affected())
}

pub async fn list_all<'e, E>(executor: E) -> Result<Vec<UrlMapping>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT original, token FROM mappings ORDER BY original")
            .fetch_all(executor)
            .await?;

    Ok(rows.into_iter().map(into_mapping).collect())
}

pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM mappings")
        .fetch_one(executor)
        .await
}
