mod common;

use std::sync::Arc;
use wordlink::domain::repositories::CredentialRepository;
use wordlink::infrastructure::persistence::SqliteCredentialRepository;

#[tokio::test]
async fn test_upsert_and_find() {
    let pool = common::memory_pool().await;
    let repo = SqliteCredentialRepository::new(Arc::new(pool));

    assert!(repo.find("admin").await.unwrap().is_none());

    repo.upsert("admin", "hash-1").await.unwrap();
    repo.upsert("admin", "hash-2").await.unwrap();

    let credential = repo.find("admin").await.unwrap().unwrap();
    assert_eq!(credential.username, "admin");
    assert_eq!(credential.password_hash, "hash-2");
}

#[tokio::test]
async fn test_insert_if_absent_keeps_existing() {
    let pool = common::memory_pool().await;
    let repo = SqliteCredentialRepository::new(Arc::new(pool));

    assert!(repo.insert_if_absent("admin", "first").await.unwrap());
    assert!(!repo.insert_if_absent("admin", "second").await.unwrap());

    let credential = repo.find("admin").await.unwrap().unwrap();
    assert_eq!(credential.password_hash, "first");
}
