//! Admin routes — password login and the session extractor guarding edits.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;
use tracing::{info, warn};

use crate::services::session::SESSION_HOURS;
use crate::state::AppState;

pub const COOKIE_NAME: &str = "admin_session";

// =============================================================================
// ADMIN EXTRACTOR
// =============================================================================

/// A request carrying a valid admin session cookie.
/// Use as a handler parameter to require admin access.
pub struct AdminSession {
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AdminSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();

        let app_state = AppState::from_ref(state);
        if !app_state.sessions.validate(token) {
            return Err(StatusCode::UNAUTHORIZED);
        }

        Ok(Self { token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginBody {
    password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// `POST /api/admin/login` — compare against the document's admin password.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<(CookieJar, Json<LoginResponse>), StatusCode> {
    if !state.site.verify_admin(&body.password).await {
        warn!("admin login rejected");
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = state.sessions.create();
    let cookie = Cookie::build((COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure)
        .max_age(Duration::hours(SESSION_HOURS));

    info!("admin session started");
    Ok((CookieJar::new().add(cookie), Json(LoginResponse { token })))
}

/// `POST /api/admin/logout` — forget the session, clear cookie.
pub async fn logout(State(state): State<AppState>, admin: AdminSession) -> impl IntoResponse {
    state.sessions.revoke(&admin.token);

    let cookie = Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure)
        .max_age(Duration::ZERO);

    (CookieJar::new().add(cookie), StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
