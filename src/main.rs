mod config;
mod db;
mod document;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::loader::LoadOrchestrator;
use services::remote::{HttpPublishedSource, PublishedSource};
use services::site::SiteService;
use services::store::ContentStore;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::SiteConfig::from_env();

    // The store opens lazily; an unavailable store only costs persistence.
    let store = Arc::new(ContentStore::new(config.database_url.clone()));

    // Remote tier is optional: startup proceeds without it.
    let remote: Option<Arc<dyn PublishedSource>> = match config.remote_base_url.as_deref() {
        Some(base_url) => match HttpPublishedSource::new(base_url, config.remote_timeouts) {
            Ok(source) => {
                tracing::info!(base_url = source.base_url(), paths = ?config.remote_paths, "published document origin configured");
                Some(Arc::new(source))
            }
            Err(e) => {
                tracing::warn!(error = %e, "published document origin unusable, remote tier disabled");
                None
            }
        },
        None => None,
    };

    let fallback = document::SiteDocument::builtin().expect("built-in document encodes");
    let loader = LoadOrchestrator::new(store.clone(), remote, config.remote_paths.clone(), fallback);
    let site = SiteService::bootstrap(store, loader).await;

    let cookie_secure = config::env_bool("COOKIE_SECURE").unwrap_or(false);
    let state = state::AppState::new(site, cookie_secure);

    let app = routes::app(state, &config.publish_dir);
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "holdings-site listening");
    axum::serve(listener, app).await.expect("server failed");
}
