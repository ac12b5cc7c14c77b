use super::*;
use serde_json::json;

fn memory_store() -> ContentStore {
    ContentStore::new("sqlite::memory:")
}

#[tokio::test]
async fn get_on_fresh_store_is_absent() {
    let store = memory_store();
    assert!(!store.is_open());
    assert!(store.get().await.unwrap().is_none());
    assert!(store.is_open());
}

#[tokio::test]
async fn put_then_get_round_trips() {
    let store = memory_store();
    let doc = SiteDocument::builtin().unwrap();
    store.put(&doc).await.unwrap();
    assert_eq!(store.get().await.unwrap(), Some(doc));
}

#[tokio::test]
async fn put_overwrites_previous_value() {
    let store = memory_store();
    store.put(&SiteDocument::from_value(json!({"hero": {"title": "A"}}))).await.unwrap();
    store.put(&SiteDocument::from_value(json!({"hero": {"title": "B"}}))).await.unwrap();

    let stored = store.get().await.unwrap().unwrap();
    assert_eq!(stored.as_value(), &json!({"hero": {"title": "B"}}));
}

#[tokio::test]
async fn empty_catalog_is_stored_as_empty_list() {
    let store = memory_store();
    let mut value = SiteDocument::builtin().unwrap().into_value();
    value["catalog"] = json!([]);
    store.put(&SiteDocument::from_value(value)).await.unwrap();

    let stored = store.get().await.unwrap().unwrap();
    assert_eq!(stored.as_value()["catalog"], json!([]));
}

#[tokio::test]
async fn stored_null_reads_as_absent() {
    let store = memory_store();
    store.put(&SiteDocument::from_value(serde_json::Value::Null)).await.unwrap();
    assert!(store.get().await.unwrap().is_none());
}

#[tokio::test]
async fn clear_makes_get_absent() {
    let store = memory_store();
    store.put(&SiteDocument::builtin().unwrap()).await.unwrap();
    store.clear().await.unwrap();
    assert!(store.get().await.unwrap().is_none());

    // Clearing an already-empty store is fine too.
    store.clear().await.unwrap();
    assert!(store.get().await.unwrap().is_none());
}

#[tokio::test]
async fn concurrent_opens_share_one_pool() {
    let store = memory_store();
    let pools = futures::future::join_all((0..8).map(|_| store.open())).await;

    let first: *const SqlitePool = *pools[0].as_ref().unwrap();
    for pool in &pools {
        assert!(std::ptr::eq(first, *pool.as_ref().unwrap()));
    }
}

#[tokio::test]
async fn unopenable_database_is_unavailable() {
    let store = ContentStore::new("sqlite:///nonexistent-dir-for-site-tests/sub/site.db");
    let err = store.get().await.unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
    assert_eq!(err.error_code(), "E_STORAGE_UNAVAILABLE");
    assert!(!store.is_open());
}

#[tokio::test]
async fn corrupt_stored_value_is_a_read_failure() {
    let store = memory_store();
    let pool = store.open().await.unwrap();
    sqlx::query("INSERT INTO site_config (key, value) VALUES (?, ?)")
        .bind(CONFIG_KEY)
        .bind("{not json")
        .execute(pool)
        .await
        .unwrap();

    assert!(matches!(store.get().await, Err(StoreError::ReadFailed(_))));
}
