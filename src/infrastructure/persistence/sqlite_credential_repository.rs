//! SQLite implementation of the credential repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::Credential;
use crate::domain::repositories::CredentialRepository;
use crate::error::AppError;

/// Stores Argon2 password hashes. Plain passwords never reach this layer.
pub struct SqliteCredentialRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteCredentialRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for SqliteCredentialRepository {
    async fn find(&self, username: &str) -> Result<Option<Credential>, AppError> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT username, password_hash FROM credentials WHERE username = ?")
                .bind(username)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(|(username, password_hash)| Credential {
            username,
            password_hash,
        }))
    }

    async fn upsert(&self, username: &str, password_hash: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO credentials (username, password_hash)
            VALUES (?, ?)
            ON CONFLICT (username) DO UPDATE SET password_hash = excluded.password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn insert_if_absent(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, AppError> {
        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO credentials (username, password_hash) VALUES (?, ?)",
        )
        .bind(username)
        .bind(password_hash)
        .execute(self.pool.as_ref())
        .await?
        .rows_affected();

        Ok(inserted > 0)
    }
}
