//! Published document source — the remote tier of the load fallback.
//!
//! ARCHITECTURE
//! ============
//! `PublishedSource` is the seam the orchestrator depends on; the HTTP
//! implementation is the production one and tests substitute scripted
//! sources. A source returns the raw body text; parsing belongs to the
//! orchestrator so that transport and parse failures stay distinct.

use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use tracing::{debug, info};

use crate::config::RemoteTimeouts;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Network or transport failure before a status was received, or while
    /// reading the body.
    #[error("fetch {path} failed: {reason}")]
    FetchFailed { path: String, reason: String },

    /// The server answered with a non-success status.
    #[error("fetch {path} returned status {status}")]
    Status { path: String, status: u16 },

    /// The body is not a JSON document.
    #[error("parse {path} failed: {reason}")]
    ParseFailed { path: String, reason: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl RemoteError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FetchFailed { .. } | Self::Status { .. } => "E_REMOTE_FETCH_FAILED",
            Self::ParseFailed { .. } => "E_REMOTE_PARSE_FAILED",
            Self::ClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }
}

// =============================================================================
// SOURCE TRAIT
// =============================================================================

/// A read-only origin for the published document. Enables mocking in tests.
#[async_trait::async_trait]
pub trait PublishedSource: Send + Sync {
    /// Fetch the body at `path` as text.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::FetchFailed`] or [`RemoteError::Status`] when
    /// no body could be read, and [`RemoteError::ParseFailed`] when the body
    /// is not UTF-8 text.
    async fn fetch(&self, path: &str) -> Result<String, RemoteError>;
}

// =============================================================================
// HTTP SOURCE
// =============================================================================

pub struct HttpPublishedSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPublishedSource {
    /// Build a source rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::ClientBuild`] if the HTTP client fails to build.
    pub fn new(base_url: &str, timeouts: RemoteTimeouts) -> Result<Self, RemoteError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeouts.request {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = timeouts.connect {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder.build().map_err(|e| RemoteError::ClientBuild(e.to_string()))?;

        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl PublishedSource for HttpPublishedSource {
    async fn fetch(&self, path: &str) -> Result<String, RemoteError> {
        let url = format!("{}{path}", self.base_url);
        info!(%url, "fetching published document");

        let fetch_failed = |e: reqwest::Error| RemoteError::FetchFailed { path: path.to_owned(), reason: e.to_string() };

        let mut response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(fetch_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status { path: path.to_owned(), status: status.as_u16() });
        }

        let expected = response.content_length();
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(fetch_failed)? {
            body.extend_from_slice(&chunk);
            debug!(path, received = body.len(), ?expected, "published document progress");
        }
        info!(path, bytes = body.len(), "published document received");

        String::from_utf8(body).map_err(|e| RemoteError::ParseFailed { path: path.to_owned(), reason: e.to_string() })
    }
}

#[cfg(test)]
#[path = "remote_test.rs"]
mod tests;
