//! Site service — the in-memory authoritative document and its operations.
//!
//! DESIGN
//! ======
//! The document resolved at startup lives behind an `RwLock`. Every change
//! builds a whole new document and replaces the old one, then persists it.
//! The write lock is held across the store write so the stored order of
//! writes matches the in-memory order.
//!
//! A failed store write never rolls back the in-memory document; it is
//! reported back as `persisted: false` for the caller to surface.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::loader::{DocumentSource, LoadOrchestrator, Resolved};
use super::store::{ContentStore, StoreError};
use crate::document::{DocumentError, SiteDocument};

/// Outcome of persisting a document after an in-memory change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SaveOutcome {
    pub persisted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SiteError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Document(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
        }
    }
}

pub struct SiteService {
    store: Arc<ContentStore>,
    loader: LoadOrchestrator,
    current: RwLock<Resolved>,
}

impl SiteService {
    /// Run the load orchestrator and hold its result.
    pub async fn bootstrap(store: Arc<ContentStore>, loader: LoadOrchestrator) -> Self {
        let resolved = loader.load().await;
        info!(source = ?resolved.source, "site document resolved");
        Self { store, loader, current: RwLock::new(resolved) }
    }

    pub async fn snapshot(&self) -> Resolved {
        self.current.read().await.clone()
    }

    #[cfg(test)]
    pub async fn document(&self) -> SiteDocument {
        self.current.read().await.document.clone()
    }

    pub async fn verify_admin(&self, password: &str) -> bool {
        self.current.read().await.document.admin_password() == password
    }

    // =========================================================================
    // WHOLE-DOCUMENT OPERATIONS
    // =========================================================================

    /// Replace the current document and persist it. A `null` document is
    /// ignored and reported as not persisted.
    pub async fn save(&self, document: SiteDocument) -> SaveOutcome {
        if document.is_empty() {
            warn!("refusing to save a null site document");
            return SaveOutcome { persisted: false };
        }
        let mut current = self.current.write().await;
        current.document = document;
        current.source = DocumentSource::Local;
        self.persist(&current.document).await
    }

    /// Clear the local store, then resolve the document again from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Store`] if the store cannot be cleared; the
    /// current document is left as it was.
    pub async fn reset(&self) -> Result<DocumentSource, SiteError> {
        let mut current = self.current.write().await;
        self.store.clear().await?;
        *current = self.loader.load().await;
        info!(source = ?current.source, "site document reset");
        Ok(current.source.clone())
    }

    /// Pretty JSON of the current document.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Document`] if serialization fails.
    pub async fn export(&self) -> Result<String, SiteError> {
        Ok(self.current.read().await.document.to_pretty_json()?)
    }

    /// Substitute a previously exported document wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Document`] if `text` is not JSON or is `null`;
    /// the current document is left untouched.
    pub async fn import(&self, text: &str) -> Result<SaveOutcome, SiteError> {
        let document = SiteDocument::parse(text)?;
        if document.is_empty() {
            return Err(DocumentError::Empty.into());
        }
        if let Err(e) = document.typed() {
            warn!(error = %e, "imported document does not match the site schema, accepting as-is");
        }
        Ok(self.save(document).await)
    }

    // =========================================================================
    // EDITS
    // =========================================================================

    /// # Errors
    ///
    /// Returns [`SiteError::Document`] when the path cannot be set.
    pub async fn set_field(&self, path: &[String], value: Value, archive: bool) -> Result<SaveOutcome, SiteError> {
        let (outcome, ()) = self.edit(|doc| doc.set_field(path, value, archive)).await?;
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns [`SiteError::Document`] if the document root is not an object.
    pub async fn add_vault_item(&self, url: String, label: String) -> Result<(SaveOutcome, String), SiteError> {
        self.edit(|doc| doc.push_vault_item(url, label)).await
    }

    /// # Errors
    ///
    /// Returns [`SiteError::Document`] if no vault item has `id`.
    pub async fn remove_vault_item(&self, id: &str) -> Result<SaveOutcome, SiteError> {
        let (outcome, ()) = self.edit(|doc| doc.remove_vault_item(id)).await?;
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns [`SiteError::Document`] for blank name or email.
    pub async fn subscribe(&self, name: &str, email: &str) -> Result<SaveOutcome, SiteError> {
        let (outcome, ()) = self.edit(|doc| doc.add_subscriber(name, email)).await?;
        Ok(outcome)
    }

    /// Apply `change` to a copy of the current document; on success the copy
    /// replaces the current document and is persisted.
    async fn edit<T>(
        &self,
        change: impl FnOnce(&mut SiteDocument) -> Result<T, DocumentError>,
    ) -> Result<(SaveOutcome, T), SiteError> {
        let mut current = self.current.write().await;
        let mut next = current.document.clone();
        let result = change(&mut next)?;

        current.document = next;
        current.source = DocumentSource::Local;
        let outcome = self.persist(&current.document).await;
        Ok((outcome, result))
    }

    async fn persist(&self, document: &SiteDocument) -> SaveOutcome {
        match self.store.put(document).await {
            Ok(()) => SaveOutcome { persisted: true },
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "site document kept in memory only");
                SaveOutcome { persisted: false }
            }
        }
    }
}

#[cfg(test)]
#[path = "site_test.rs"]
mod tests;
