//! Administrator credentials and privileged-access checks.

use std::sync::Arc;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::Rng;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::domain::repositories::CredentialRepository;
use crate::error::AppError;

/// The single administrator account.
pub const ADMIN_USERNAME: &str = "admin";

/// Password installed when no credential exists yet.
pub const DEFAULT_PASSWORD: &str = "password";

/// Service for password login and bearer-token authorization.
///
/// Passwords are stored as Argon2id PHC strings. The bearer token is kept
/// only as its SHA-256 digest.
pub struct AuthService<R: CredentialRepository> {
    repository: Arc<R>,
    bearer_digest: Option<[u8; 32]>,
}

impl<R: CredentialRepository> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - credential storage
    /// - `bearer_token` - static token granting privileged access, if any
    pub fn new(repository: Arc<R>, bearer_token: Option<&str>) -> Self {
        Self {
            repository,
            bearer_digest: bearer_token.map(digest),
        }
    }

    /// Installs the default administrator password if none is stored.
    ///
    /// Returns true if the default was installed.
    pub async fn ensure_default_credentials(&self) -> Result<bool, AppError> {
        if self.repository.find(ADMIN_USERNAME).await?.is_some() {
            return Ok(false);
        }

        let hash = hash_password(DEFAULT_PASSWORD.to_string()).await?;
        let inserted = self
            .repository
            .insert_if_absent(ADMIN_USERNAME, &hash)
            .await?;

        if inserted {
            tracing::warn!(
                username = ADMIN_USERNAME,
                "Default administrator password installed, change it"
            );
        }

        Ok(inserted)
    }

    /// Checks a username and password pair.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<bool, AppError> {
        let Some(credential) = self.repository.find(username).await? else {
            return Ok(false);
        };

        verify_password(password.to_string(), credential.password_hash).await
    }

    /// Replaces the administrator password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `new_password` is blank.
    pub async fn change_password(&self, new_password: &str) -> Result<(), AppError> {
        if new_password.trim().is_empty() {
            return Err(AppError::bad_request(
                "Password must not be empty",
                json!({ "field": "new_pass" }),
            ));
        }

        let hash = hash_password(new_password.to_string()).await?;
        self.repository.upsert(ADMIN_USERNAME, &hash).await?;

        tracing::info!(username = ADMIN_USERNAME, "Administrator password changed");
        Ok(())
    }

    /// Restores [`DEFAULT_PASSWORD`].
    pub async fn reset_password(&self) -> Result<(), AppError> {
        self.change_password(DEFAULT_PASSWORD).await
    }

    /// Returns true if `token` equals the configured bearer token.
    pub fn verify_bearer(&self, token: &str) -> bool {
        self.bearer_digest
            .is_some_and(|expected| expected == digest(token))
    }
}

fn digest(value: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(value.as_bytes()));
    out
}

/// Hashes `password` with Argon2id and a random salt.
pub(crate) async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let mut salt_bytes = [0u8; 16];
        rand::rng().fill(&mut salt_bytes);

        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| {
            AppError::internal("Failed to hash password", json!({ "reason": e.to_string() }))
        })?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                AppError::internal("Failed to hash password", json!({ "reason": e.to_string() }))
            })
    })
    .await
    .map_err(|e| AppError::internal("Password hashing task failed", json!({ "reason": e.to_string() })))?
}

/// Checks `password` against a stored PHC hash. A malformed hash never
/// verifies.
pub(crate) async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || {
        let Ok(parsed) = PasswordHash::new(&hash) else {
            tracing::error!("Stored password hash is malformed");
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
    .await
    .map_err(|e| {
        AppError::internal("Password verification task failed", json!({ "reason": e.to_string() }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Credential;
    use crate::domain::repositories::MockCredentialRepository;

    #[tokio::test]
    async fn test_hash_and_verify_password() {
        let hash = hash_password("secret".to_string()).await.unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("wrong".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let first = hash_password("secret".to_string()).await.unwrap();
        let second = hash_password("secret".to_string()).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_malformed_hash_does_not_verify() {
        let result = verify_password("secret".to_string(), "not-a-hash".to_string()).await;
        assert!(!result.unwrap());
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let hash = hash_password("secret".to_string()).await.unwrap();
        let mut mock_repo = MockCredentialRepository::new();

        mock_repo
            .expect_find()
            .withf(|username| username == ADMIN_USERNAME)
            .returning(move |username| {
                Ok(Some(Credential {
                    username: username.to_string(),
                    password_hash: hash.clone(),
                }))
            });

        let service = AuthService::new(Arc::new(mock_repo), None);

        assert!(service.verify_credentials("admin", "secret").await.unwrap());
        assert!(!service.verify_credentials("admin", "nope").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_credentials_unknown_user() {
        let mut mock_repo = MockCredentialRepository::new();
        mock_repo.expect_find().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), None);
        assert!(!service.verify_credentials("root", "password").await.unwrap());
    }

    #[tokio::test]
    async fn test_ensure_default_credentials_installs_once() {
        let mut mock_repo = MockCredentialRepository::new();

        mock_repo.expect_find().times(1).returning(|_| Ok(None));
        mock_repo
            .expect_insert_if_absent()
            .withf(|username, hash| username == ADMIN_USERNAME && hash.starts_with("$argon2"))
            .times(1)
            .returning(|_, _| Ok(true));

        let service = AuthService::new(Arc::new(mock_repo), None);
        assert!(service.ensure_default_credentials().await.unwrap());
    }

    #[tokio::test]
    async fn test_ensure_default_credentials_keeps_existing() {
        let mut mock_repo = MockCredentialRepository::new();

        mock_repo.expect_find().times(1).returning(|username| {
            Ok(Some(Credential {
                username: username.to_string(),
                password_hash: "$argon2id$existing".to_string(),
            }))
        });
        mock_repo.expect_insert_if_absent().times(0);

        let service = AuthService::new(Arc::new(mock_repo), None);
        assert!(!service.ensure_default_credentials().await.unwrap());
    }

    #[tokio::test]
    async fn test_change_password_rejects_blank() {
        let mut mock_repo = MockCredentialRepository::new();
        mock_repo.expect_upsert().times(0);

        let service = AuthService::new(Arc::new(mock_repo), None);
        let result = service.change_password("  ").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_change_password_stores_hash() {
        let mut mock_repo = MockCredentialRepository::new();

        mock_repo
            .expect_upsert()
            .withf(|username, hash| username == ADMIN_USERNAME && hash != "new-secret")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), None);
        assert!(service.change_password("new-secret").await.is_ok());
    }

    #[test]
    fn test_verify_bearer() {
        let service = AuthService::new(Arc::new(MockCredentialRepository::new()), Some("tok"));

        assert!(service.verify_bearer("tok"));
        assert!(!service.verify_bearer("other"));
    }

    #[test]
    fn test_verify_bearer_without_token_configured() {
        let service = AuthService::new(Arc::new(MockCredentialRepository::new()), None);
        assert!(!service.verify_bearer(""));
    }
}
