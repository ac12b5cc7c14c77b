//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the site document API, the admin session endpoints, and static
//! serving of the operator-published `site_data.json` under both of its
//! well-known paths.

pub mod admin;
pub mod site;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub const PUBLISHED_FILE: &str = "site_data.json";

/// Build the application router.
pub fn app(state: AppState, publish_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let published = publish_dir.join(PUBLISHED_FILE);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/site", get(site::get_site).put(site::put_site))
        .route("/api/site/export", get(site::export_site))
        .route("/api/site/import", post(site::import_site))
        .route("/api/site/reset", post(site::reset_site))
        .route("/api/site/field", patch(site::set_field))
        .route("/api/site/vault", post(site::add_vault_item))
        .route("/api/site/vault/{id}", delete(site::remove_vault_item))
        .route("/api/newsletter/subscribe", post(site::subscribe))
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/logout", post(admin::logout))
        .route_service("/api/site_data.json", ServeFile::new(&published))
        .route_service("/site_data.json", ServeFile::new(&published))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
