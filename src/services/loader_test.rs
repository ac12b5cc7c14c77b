use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::json;

use super::*;

// =============================================================================
// SCRIPTED SOURCE
// =============================================================================

enum Reply {
    Body(&'static str),
    Status(u16),
    Transport,
}

#[derive(Default)]
struct ScriptedSource {
    replies: HashMap<&'static str, Reply>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    fn with(mut self, path: &'static str, reply: Reply) -> Self {
        self.replies.insert(path, reply);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PublishedSource for ScriptedSource {
    async fn fetch(&self, path: &str) -> Result<String, RemoteError> {
        self.calls.lock().unwrap().push(path.to_owned());
        match self.replies.get(path) {
            Some(Reply::Body(body)) => Ok((*body).to_owned()),
            Some(Reply::Status(status)) => Err(RemoteError::Status { path: path.to_owned(), status: *status }),
            Some(Reply::Transport) | None => {
                Err(RemoteError::FetchFailed { path: path.to_owned(), reason: "connection refused".into() })
            }
        }
    }
}

const PRIMARY: &str = "/api/site_data.json";
const FALLBACK: &str = "/site_data.json";

fn paths() -> Vec<String> {
    vec![PRIMARY.to_owned(), FALLBACK.to_owned()]
}

fn default_doc() -> SiteDocument {
    SiteDocument::builtin().unwrap()
}

fn orchestrator(store: Arc<ContentStore>, source: Arc<ScriptedSource>) -> LoadOrchestrator {
    LoadOrchestrator::new(store, Some(source as Arc<dyn PublishedSource>), paths(), default_doc())
}

fn memory_store() -> Arc<ContentStore> {
    Arc::new(ContentStore::new("sqlite::memory:"))
}

// =============================================================================
// PRIORITY
// =============================================================================

#[tokio::test]
async fn local_document_wins_over_remote() {
    let store = memory_store();
    let local = SiteDocument::from_value(json!({"hero": {"title": "A"}}));
    store.put(&local).await.unwrap();
    let source = Arc::new(ScriptedSource::default().with(PRIMARY, Reply::Body(r#"{"hero":{"title":"B"}}"#)));

    let resolved = orchestrator(store, source.clone()).load().await;
    assert_eq!(resolved.document, local);
    assert_eq!(resolved.source, DocumentSource::Local);
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn stored_null_falls_through_to_remote() {
    let store = memory_store();
    store.put(&SiteDocument::from_value(serde_json::Value::Null)).await.unwrap();
    let source = Arc::new(ScriptedSource::default().with(PRIMARY, Reply::Body(r#"{"hero":{"title":"B"}}"#)));

    let resolved = orchestrator(store, source.clone()).load().await;
    assert_eq!(resolved.source, DocumentSource::Remote { path: PRIMARY.to_owned() });
    assert_eq!(resolved.document.as_value(), &json!({"hero": {"title": "B"}}));
    assert_eq!(source.calls(), vec![PRIMARY.to_owned()]);
}

#[tokio::test]
async fn transport_error_on_primary_tries_fallback() {
    let source = Arc::new(
        ScriptedSource::default()
            .with(PRIMARY, Reply::Transport)
            .with(FALLBACK, Reply::Body(r#"{"hero":{"title":"F"}}"#)),
    );

    let resolved = orchestrator(memory_store(), source.clone()).load().await;
    assert_eq!(resolved.document.as_value(), &json!({"hero": {"title": "F"}}));
    assert_eq!(resolved.source, DocumentSource::Remote { path: FALLBACK.to_owned() });
    assert_eq!(source.calls(), paths());
}

#[tokio::test]
async fn primary_success_skips_fallback() {
    let source = Arc::new(ScriptedSource::default().with(PRIMARY, Reply::Body(r#"{"roster":[]}"#)));

    let resolved = orchestrator(memory_store(), source.clone()).load().await;
    assert_eq!(resolved.source, DocumentSource::Remote { path: PRIMARY.to_owned() });
    assert_eq!(source.calls(), vec![PRIMARY.to_owned()]);
}

#[tokio::test]
async fn not_found_then_partial_document_is_accepted_as_is() {
    let source = Arc::new(
        ScriptedSource::default()
            .with(PRIMARY, Reply::Status(404))
            .with(FALLBACK, Reply::Body(r#"{"hero":{"title":"X"}}"#)),
    );

    let resolved = orchestrator(memory_store(), source).load().await;
    assert_eq!(resolved.document.as_value(), &json!({"hero": {"title": "X"}}));
}

#[tokio::test]
async fn unusable_remote_paths_fall_back_to_default() {
    let source = Arc::new(
        ScriptedSource::default()
            .with(PRIMARY, Reply::Body("<!doctype html><title>proxy</title>"))
            .with(FALLBACK, Reply::Status(502)),
    );

    let resolved = orchestrator(memory_store(), source.clone()).load().await;
    assert_eq!(resolved.document, default_doc());
    assert_eq!(resolved.source, DocumentSource::Default);
    // Each path is attempted exactly once; a parse failure is not retried.
    assert_eq!(source.calls(), paths());
}

#[tokio::test]
async fn unavailable_store_falls_through_to_remote() {
    let store = Arc::new(ContentStore::new("sqlite:///nonexistent-dir-for-site-tests/site.db"));
    let source = Arc::new(ScriptedSource::default().with(PRIMARY, Reply::Body(r#"{"hero":{"title":"R"}}"#)));

    let resolved = orchestrator(store, source).load().await;
    assert_eq!(resolved.source, DocumentSource::Remote { path: PRIMARY.to_owned() });
}

#[tokio::test]
async fn missing_origin_skips_remote_tier() {
    let resolved = LoadOrchestrator::new(memory_store(), None, paths(), default_doc()).load().await;
    assert_eq!(resolved.source, DocumentSource::Default);
    assert_eq!(resolved.document, default_doc());
}

// =============================================================================
// IDEMPOTENCE
// =============================================================================

#[tokio::test]
async fn repeated_loads_agree() {
    let source = Arc::new(ScriptedSource::default().with(FALLBACK, Reply::Body(r#"{"catalog":[]}"#)));
    let loader = orchestrator(memory_store(), source);

    let first = loader.load().await;
    let second = loader.load().await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn cleared_store_reloads_from_next_tier() {
    let store = memory_store();
    store.put(&SiteDocument::from_value(json!({"hero": {"title": "A"}}))).await.unwrap();
    let loader = LoadOrchestrator::new(store.clone(), None, paths(), default_doc());
    assert_eq!(loader.load().await.source, DocumentSource::Local);

    store.clear().await.unwrap();
    assert!(store.get().await.unwrap().is_none());
    assert_eq!(loader.load().await.source, DocumentSource::Default);
}

#[test]
fn document_source_serializes_with_tier_tag() {
    let remote = serde_json::to_value(DocumentSource::Remote { path: FALLBACK.to_owned() }).unwrap();
    assert_eq!(remote, json!({"tier": "remote", "path": "/site_data.json"}));
    assert_eq!(serde_json::to_value(DocumentSource::Local).unwrap(), json!({"tier": "local"}));
}
