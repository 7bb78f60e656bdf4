mod common;

use std::collections::HashSet;
use std::sync::Arc;
use wordlink::application::services::RecordService;
use wordlink::domain::matching::InputMatcher;
use wordlink::infrastructure::persistence::SqliteRecordRepository;

const TASKS: usize = 16;

fn service(db: &common::TempDatabase) -> Arc<RecordService<SqliteRecordRepository>> {
    let repo = SqliteRecordRepository::new(Arc::new(db.pool.clone()), common::test_retry());
    Arc::new(RecordService::new(Arc::new(repo), InputMatcher::default()))
}

fn vocabulary(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("word{i}")).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_distinct_urls_get_distinct_tokens() {
    let db = common::TempDatabase::new(8).await;
    let words = vocabulary(TASKS);
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    common::seed_words(&db.pool, &refs).await;

    let service = service(&db);
    let handles: Vec<_> = (0..TASKS)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move { service.shorten(&format!("example.com/{i}")).await })
        })
        .collect();

    let mut tokens = HashSet::new();
    for handle in handles {
        let allocation = handle.await.unwrap().unwrap();
        assert!(allocation.is_new());
        assert!(tokens.insert(allocation.into_mapping().token));
    }

    assert_eq!(tokens.len(), TASKS);
    assert_eq!(common::unused_count(&db.pool).await, 0);
    assert_eq!(common::mapping_count(&db.pool).await, TASKS as i64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_same_url_collapses_to_one_allocation() {
    let db = common::TempDatabase::new(8).await;
    let words = vocabulary(TASKS);
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    common::seed_words(&db.pool, &refs).await;

    let service = service(&db);
    let handles: Vec<_> = (0..TASKS)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.shorten("example.com").await })
        })
        .collect();

    let mut tokens = HashSet::new();
    let mut created = 0;
    for handle in handles {
        let allocation = handle.await.unwrap().unwrap();
        if allocation.is_new() {
            created += 1;
        }
        tokens.insert(allocation.into_mapping().token);
    }

    assert_eq!(created, 1);
    assert_eq!(tokens.len(), 1);
    assert_eq!(common::mapping_count(&db.pool).await, 1);
    assert_eq!(common::unused_count(&db.pool).await, TASKS as i64 - 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_shorten_and_delete_keep_pool_consistent() {
    let db = common::TempDatabase::new(8).await;
    let words = vocabulary(TASKS);
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    common::seed_words(&db.pool, &refs).await;

    let service = service(&db);
    let handles: Vec<_> = (0..TASKS)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                let url = format!("example.com/{i}");
                service.shorten(&url).await.unwrap();
                if i % 2 == 0 {
                    assert!(service.delete_by_input(&url).await.unwrap());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    let live = common::mapping_count(&db.pool).await;
    let used: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dictionary WHERE used = 1")
        .fetch_one(&db.pool)
        .await
        .unwrap();

    assert_eq!(live, (TASKS / 2) as i64);
    assert_eq!(used, live);
}
