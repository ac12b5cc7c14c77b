//! Site document routes — read, save, reset, export/import and edits.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::admin::AdminSession;
use crate::document::{DocumentError, DocumentSummary, SiteDocument};
use crate::services::loader::DocumentSource;
use crate::services::site::{SaveOutcome, SiteError};
use crate::state::AppState;

pub const EXPORT_FILENAME: &str = "site_data.json";

// =============================================================================
// ERRORS
// =============================================================================

/// JSON error body: `{ "error": code, "message": text }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl From<SiteError> for ApiError {
    fn from(err: SiteError) -> Self {
        Self { status: site_error_to_status(&err), code: err.error_code(), message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.code, "message": self.message }))).into_response()
    }
}

pub(crate) fn site_error_to_status(err: &SiteError) -> StatusCode {
    match err {
        SiteError::Document(DocumentError::VaultItemNotFound(_)) => StatusCode::NOT_FOUND,
        SiteError::Document(DocumentError::NotAnObject | DocumentError::Shape(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        SiteError::Document(_) => StatusCode::BAD_REQUEST,
        SiteError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

// =============================================================================
// READ
// =============================================================================

#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub source: DocumentSource,
    pub summary: DocumentSummary,
    pub document: SiteDocument,
}

/// `GET /api/site` — the current document and the tier it came from.
pub async fn get_site(State(state): State<AppState>) -> Json<SiteResponse> {
    let resolved = state.site.snapshot().await;
    Json(SiteResponse { source: resolved.source, summary: resolved.document.summary(), document: resolved.document })
}

/// `GET /api/site/export` — the current document as a downloadable file.
pub async fn export_site(State(state): State<AppState>, _admin: AdminSession) -> Result<Response, ApiError> {
    let body = state.site.export().await?;
    Ok((
        [
            (CONTENT_TYPE, "application/json".to_owned()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{EXPORT_FILENAME}\"")),
        ],
        body,
    )
        .into_response())
}

// =============================================================================
// WHOLE-DOCUMENT WRITES
// =============================================================================

/// `PUT /api/site` — replace the whole document.
pub async fn put_site(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(body): Json<Value>,
) -> Json<SaveOutcome> {
    Json(state.site.save(SiteDocument::from_value(body)).await)
}

/// `POST /api/site/import` — raw JSON text; invalid input changes nothing.
pub async fn import_site(
    State(state): State<AppState>,
    _admin: AdminSession,
    body: String,
) -> Result<Json<SaveOutcome>, ApiError> {
    let outcome = state.site.import(&body).await.inspect_err(|e| {
        warn!(error = %e, "import rejected");
    })?;
    Ok(Json(outcome))
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub source: DocumentSource,
}

/// `POST /api/site/reset` — clear the local record and resolve again.
pub async fn reset_site(State(state): State<AppState>, _admin: AdminSession) -> Result<Json<ResetResponse>, ApiError> {
    let source = state.site.reset().await?;
    Ok(Json(ResetResponse { source }))
}

// =============================================================================
// EDITS
// =============================================================================

fn default_archive() -> bool {
    true
}

#[derive(Deserialize)]
pub struct SetFieldBody {
    path: Vec<String>,
    value: Value,
    #[serde(default = "default_archive")]
    archive: bool,
}

/// `PATCH /api/site/field` — set one nested value.
pub async fn set_field(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(body): Json<SetFieldBody>,
) -> Result<Json<SaveOutcome>, ApiError> {
    Ok(Json(state.site.set_field(&body.path, body.value, body.archive).await?))
}

#[derive(Deserialize)]
pub struct AddVaultItemBody {
    url: String,
    #[serde(default)]
    label: String,
}

#[derive(Debug, Serialize)]
pub struct VaultItemResponse {
    pub id: String,
    pub persisted: bool,
}

/// `POST /api/site/vault` — keep an asset for reuse.
pub async fn add_vault_item(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(body): Json<AddVaultItemBody>,
) -> Result<(StatusCode, Json<VaultItemResponse>), ApiError> {
    let (outcome, id) = state.site.add_vault_item(body.url, body.label).await?;
    Ok((StatusCode::CREATED, Json(VaultItemResponse { id, persisted: outcome.persisted })))
}

/// `DELETE /api/site/vault/{id}`
pub async fn remove_vault_item(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> Result<Json<SaveOutcome>, ApiError> {
    Ok(Json(state.site.remove_vault_item(&id).await?))
}

#[derive(Deserialize)]
pub struct SubscribeBody {
    name: String,
    email: String,
}

/// `POST /api/newsletter/subscribe` — public sign-up form.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeBody>,
) -> Result<Json<SaveOutcome>, ApiError> {
    Ok(Json(state.site.subscribe(&body.name, &body.email).await?))
}

#[cfg(test)]
#[path = "site_test.rs"]
mod tests;
