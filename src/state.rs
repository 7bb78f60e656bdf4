//! Shared application state injected into every handler.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::api::middleware::session::SessionSigner;
use crate::application::services::{AuthService, DictionaryService, RecordService};
use crate::config::Config;
use crate::domain::matching::InputMatcher;
use crate::infrastructure::persistence::{
    SqliteCredentialRepository, SqliteDictionaryRepository, SqliteRecordRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub record_service: Arc<RecordService<SqliteRecordRepository>>,
    pub dictionary_service: Arc<DictionaryService<SqliteDictionaryRepository>>,
    pub auth_service: Arc<AuthService<SqliteCredentialRepository>>,
    pub sessions: Arc<SessionSigner>,
}

impl AppState {
    /// Wires repositories and services over `pool`.
    pub fn new(pool: Arc<SqlitePool>, config: &Config) -> Self {
        let retry = config.retry_policy();

        let record_repository = Arc::new(SqliteRecordRepository::new(pool.clone(), retry));
        let dictionary_repository = Arc::new(SqliteDictionaryRepository::new(pool.clone(), retry));
        let credential_repository = Arc::new(SqliteCredentialRepository::new(pool));

        let matcher = InputMatcher::new(config.public_host.as_deref());

        Self {
            record_service: Arc::new(RecordService::new(record_repository, matcher)),
            dictionary_service: Arc::new(DictionaryService::new(dictionary_repository)),
            auth_service: Arc::new(AuthService::new(
                credential_repository,
                config.bearer_token.as_deref(),
            )),
            sessions: Arc::new(SessionSigner::new(
                &config.secret_key,
                config.session_max_age_seconds,
            )),
        }
    }
}
