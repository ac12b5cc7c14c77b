//! Load orchestrator — resolves the effective site document at startup.
//!
//! DESIGN
//! ======
//! Strict priority, first success wins, no merging:
//! 1. the local content store
//! 2. each published path in order
//! 3. the compiled-in default
//!
//! Every failure along the way is logged and skipped. Each tier is tried
//! exactly once per `load`; there are no retries and no backoff. A remote
//! body is accepted as soon as it parses as JSON.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::remote::{PublishedSource, RemoteError};
use super::store::ContentStore;
use crate::document::SiteDocument;

const BODY_PREVIEW_CHARS: usize = 500;

/// Which tier produced the resolved document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum DocumentSource {
    Local,
    Remote { path: String },
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub document: SiteDocument,
    pub source: DocumentSource,
}

pub struct LoadOrchestrator {
    store: Arc<ContentStore>,
    remote: Option<Arc<dyn PublishedSource>>,
    paths: Vec<String>,
    fallback: SiteDocument,
}

impl LoadOrchestrator {
    #[must_use]
    pub fn new(
        store: Arc<ContentStore>,
        remote: Option<Arc<dyn PublishedSource>>,
        paths: Vec<String>,
        fallback: SiteDocument,
    ) -> Self {
        Self { store, remote, paths, fallback }
    }

    /// Resolve the effective document. Always produces one.
    pub async fn load(&self) -> Resolved {
        match self.store.get().await {
            Ok(Some(document)) => {
                info!(summary = ?document.summary(), "site document loaded from local store");
                return Resolved { document, source: DocumentSource::Local };
            }
            Ok(None) => debug!("local store is empty"),
            Err(e) => warn!(error = %e, code = e.error_code(), "local store unavailable, checking published document"),
        }

        match &self.remote {
            Some(remote) => {
                for path in &self.paths {
                    match fetch_published(remote.as_ref(), path).await {
                        Ok(document) => {
                            info!(%path, summary = ?document.summary(), "published document loaded");
                            return Resolved { document, source: DocumentSource::Remote { path: path.clone() } };
                        }
                        Err(e) => warn!(error = %e, code = e.error_code(), "published document unusable, trying next path"),
                    }
                }
            }
            None => info!("no published document origin configured"),
        }

        info!("no published document found, using default template");
        Resolved { document: self.fallback.clone(), source: DocumentSource::Default }
    }
}

async fn fetch_published(remote: &dyn PublishedSource, path: &str) -> Result<SiteDocument, RemoteError> {
    let text = remote.fetch(path).await?;
    debug!(path, chars = text.len(), "published document text read");

    SiteDocument::parse(&text).map_err(|e| {
        let preview: String = text.chars().take(BODY_PREVIEW_CHARS).collect();
        error!(path, %preview, "published document is not valid JSON");
        RemoteError::ParseFailed { path: path.to_owned(), reason: e.to_string() }
    })
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
