#![allow(dead_code)]

use axum::http::{HeaderValue, header};
use axum_test::TestServer;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use wordlink::config::Config;
use wordlink::domain::repositories::DictionaryRepository;
use wordlink::infrastructure::persistence::{
    DatabaseOptions, RetryPolicy, SqliteDictionaryRepository, connect,
};
use wordlink::routes::app_router;
use wordlink::state::AppState;

pub const TEST_SECRET: &str = "test-secret";
pub const TEST_BEARER: &str = "test-bearer";
pub const TEST_HOST: &str = "s.example.com";

/// Migrated single-connection in-memory database.
pub async fn memory_pool() -> SqlitePool {
    connect(&DatabaseOptions {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        busy_timeout: Duration::from_secs(5),
    })
    .await
    .unwrap()
}

/// Migrated database file shared by several connections. Files are removed
/// on drop.
pub struct TempDatabase {
    pub pool: SqlitePool,
    path: PathBuf,
}

impl TempDatabase {
    pub async fn new(max_connections: u32) -> Self {
        let path = std::env::temp_dir().join(format!("wordlink-test-{:016x}.db", rand::random::<u64>()));

        let pool = connect(&DatabaseOptions {
            url: format!("sqlite://{}", path.display()),
            max_connections,
            busy_timeout: Duration::from_secs(10),
        })
        .await
        .unwrap();

        Self { pool, path }
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub fn test_retry() -> RetryPolicy {
    RetryPolicy::new(10, 2)
}

/// Loads `words` as the whole vocabulary.
pub async fn seed_words(pool: &SqlitePool, words: &[&str]) {
    let repo = SqliteDictionaryRepository::new(Arc::new(pool.clone()), test_retry());
    repo.replace_vocabulary(words.iter().map(|w| w.to_string()).collect())
        .await
        .unwrap();
}

pub async fn unused_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM dictionary WHERE used = 0")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn is_used(pool: &SqlitePool, word: &str) -> bool {
    sqlx::query_scalar("SELECT used FROM dictionary WHERE word = ?")
        .bind(word)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn mapping_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM mappings")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        dictionary_path: PathBuf::from("./dictionary.txt"),
        secret_key: TEST_SECRET.to_string(),
        bearer_token: Some(TEST_BEARER.to_string()),
        allowed_origins: Vec::new(),
        session_max_age_seconds: 1800,
        public_host: Some(TEST_HOST.to_string()),
        frontend_dir: None,
        db_max_connections: 1,
        db_busy_timeout_ms: 5000,
        tx_retry_attempts: 10,
        tx_retry_base_ms: 2,
    }
}

pub async fn create_test_state(pool: SqlitePool) -> AppState {
    let state = AppState::new(Arc::new(pool), &test_config());
    state.auth_service.ensure_default_credentials().await.unwrap();
    state
}

/// Test server over an in-memory database seeded with `words`.
pub async fn test_server(words: &[&str]) -> (TestServer, SqlitePool) {
    let pool = memory_pool().await;
    seed_words(&pool, words).await;

    let state = create_test_state(pool.clone()).await;
    let server = TestServer::new(app_router(state, &test_config())).unwrap();

    (server, pool)
}

pub fn bearer() -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {TEST_BEARER}")).unwrap()
}

/// Logs in as the default administrator and returns the `Cookie` header value.
pub async fn login(server: &TestServer) -> HeaderValue {
    let response = server
        .post("/api/v1/login")
        .form(&[("username", "admin"), ("password", "password")])
        .await;
    response.assert_status_ok();

    session_cookie(&response)
}

/// `name=value` part of the response's `Set-Cookie` header.
pub fn session_cookie(response: &axum_test::TestResponse) -> HeaderValue {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let pair = set_cookie.split(';').next().unwrap().to_string();

    HeaderValue::from_str(&pair).unwrap()
}
