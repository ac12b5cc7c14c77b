//! Content store — one document under one fixed key.
//!
//! DESIGN
//! ======
//! The pool is opened lazily on the first operation. `OnceCell` makes the
//! open single-flight: concurrent first callers await the same in-flight
//! open instead of racing. A failed open leaves the cell empty so a later
//! call can try again.
//!
//! `put` is one upsert statement, so a failed write leaves the previous
//! value in place. Writers are last-writer-wins.

use sqlx::SqlitePool;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::document::SiteDocument;

pub const CONFIG_KEY: &str = "current_config";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The embedded database could not be opened or migrated.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Query failure, or the stored value is not a JSON document.
    #[error("storage read failed: {0}")]
    ReadFailed(String),

    /// The engine rejected a put or clear.
    #[error("storage write failed: {0}")]
    WriteFailed(String),
}

impl StoreError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "E_STORAGE_UNAVAILABLE",
            Self::ReadFailed(_) => "E_STORAGE_READ_FAILED",
            Self::WriteFailed(_) => "E_STORAGE_WRITE_FAILED",
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

pub struct ContentStore {
    database_url: String,
    pool: OnceCell<SqlitePool>,
}

impl ContentStore {
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self { database_url: database_url.into(), pool: OnceCell::new() }
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.pool.initialized()
    }

    /// Ensure the database and its table exist. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the database cannot be opened.
    pub async fn open(&self) -> Result<&SqlitePool, StoreError> {
        self.pool
            .get_or_try_init(|| async {
                let pool = crate::db::init_pool(&self.database_url)
                    .await
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;
                info!(url = %self.database_url, "content store opened");
                Ok::<_, StoreError>(pool)
            })
            .await
    }

    /// Fetch the stored document, or `None` if nothing usable was written.
    /// A stored `null` reads as absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] or [`StoreError::ReadFailed`].
    pub async fn get(&self) -> Result<Option<SiteDocument>, StoreError> {
        let pool = self.open().await?;
        let raw: Option<String> = sqlx::query_scalar("SELECT value FROM site_config WHERE key = ?")
            .bind(CONFIG_KEY)
            .fetch_optional(pool)
            .await
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        let Some(raw) = raw else {
            return Ok(None);
        };
        let doc = SiteDocument::parse(&raw).map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        if doc.is_empty() {
            debug!("content store holds a null document, treating as empty");
            return Ok(None);
        }
        debug!(bytes = raw.len(), "content store read");
        Ok(Some(doc))
    }

    /// Replace the stored document wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] or [`StoreError::WriteFailed`].
    pub async fn put(&self, doc: &SiteDocument) -> Result<(), StoreError> {
        let json = doc.to_json().map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        let pool = self.open().await?;
        sqlx::query(
            "INSERT INTO site_config (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(CONFIG_KEY)
        .bind(&json)
        .execute(pool)
        .await
        .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        debug!(bytes = json.len(), "content store write");
        Ok(())
    }

    /// Remove every stored record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] or [`StoreError::WriteFailed`].
    pub async fn clear(&self) -> Result<(), StoreError> {
        let pool = self.open().await?;
        sqlx::query("DELETE FROM site_config")
            .execute(pool)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        info!("content store cleared");
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
