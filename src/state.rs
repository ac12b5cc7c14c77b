//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the site service, which owns the process-wide content store
//! handle and the in-memory document, plus the admin session registry.

use std::sync::Arc;

use crate::services::session::AdminSessions;
use crate::services::site::SiteService;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteService>,
    pub sessions: AdminSessions,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(site: SiteService, cookie_secure: bool) -> Self {
        Self { site: Arc::new(site), sessions: AdminSessions::new(), cookie_secure }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
