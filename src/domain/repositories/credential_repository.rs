//! Repository trait for administrator credentials.

use crate::domain::entities::Credential;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Finds the credential stored for `username`.
    async fn find(&self, username: &str) -> Result<Option<Credential>, AppError>;

    /// Stores `password_hash` for `username`, replacing any existing hash.
    async fn upsert(&self, username: &str, password_hash: &str) -> Result<(), AppError>;

    /// Stores `password_hash` only if `username` has no credential yet.
    /// Returns true if a row was inserted.
    async fn insert_if_absent(&self, username: &str, password_hash: &str)
    -> Result<bool, AppError>;
}
