use super::*;

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;

/// Serve a small fixture origin on an ephemeral loopback port.
async fn spawn_origin() -> String {
    let app = Router::new()
        .route("/missing.json", get(|| async { StatusCode::NOT_FOUND }))
        .route("/site_data.json", get(|| async { r#"{"hero":{"title":"X"}}"# }))
        .route(
            "/headers",
            get(|headers: HeaderMap| async move {
                let header = |name: &str| {
                    headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_owned()
                };
                format!("{}|{}|{}", header("accept"), header("cache-control"), header("pragma"))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/")
}

#[tokio::test]
async fn fetch_returns_body_text() {
    let base = spawn_origin().await;
    let source = HttpPublishedSource::new(&base, RemoteTimeouts::default()).unwrap();
    assert!(!source.base_url().ends_with('/'));

    let body = source.fetch("/site_data.json").await.unwrap();
    assert_eq!(body, r#"{"hero":{"title":"X"}}"#);
}

#[tokio::test]
async fn fetch_reports_non_success_status() {
    let base = spawn_origin().await;
    let source = HttpPublishedSource::new(&base, RemoteTimeouts::default()).unwrap();

    let err = source.fetch("/missing.json").await.unwrap_err();
    assert!(matches!(err, RemoteError::Status { status: 404, .. }));
    assert_eq!(err.error_code(), "E_REMOTE_FETCH_FAILED");
}

#[tokio::test]
async fn fetch_requests_json_and_bypasses_caches() {
    let base = spawn_origin().await;
    let source = HttpPublishedSource::new(&base, RemoteTimeouts::default()).unwrap();

    let echoed = source.fetch("/headers").await.unwrap();
    assert_eq!(echoed, "application/json|no-cache|no-cache");
}

#[tokio::test]
async fn fetch_reports_transport_failure() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpPublishedSource::new(&format!("http://{addr}"), RemoteTimeouts::default()).unwrap();
    let err = source.fetch("/site_data.json").await.unwrap_err();
    assert!(matches!(err, RemoteError::FetchFailed { .. }));
}
