use axum::extract::FromRequestParts;
use axum::http::Request;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::response::IntoResponse;

use super::*;
use crate::state::test_helpers::test_app_state;

async fn extract(state: &AppState, cookie: Option<&str>) -> Result<AdminSession, StatusCode> {
    let mut builder = Request::builder().uri("/api/site");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let (mut parts, ()) = builder.body(()).unwrap().into_parts();
    AdminSession::from_request_parts(&mut parts, state).await
}

#[tokio::test]
async fn login_with_default_password_issues_session() {
    let state = test_app_state().await;
    let (jar, Json(response)) =
        login(State(state.clone()), Json(LoginBody { password: "admin".into() })).await.unwrap();

    assert!(state.sessions.validate(&response.token));
    let cookie = jar.get(COOKIE_NAME).unwrap();
    assert_eq!(cookie.value(), response.token);
    assert_eq!(cookie.http_only(), Some(true));
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let state = test_app_state().await;
    let err = login(State(state), Json(LoginBody { password: "nope".into() })).await.unwrap_err();
    assert_eq!(err, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn extractor_accepts_known_cookie() {
    let state = test_app_state().await;
    let token = state.sessions.create();

    let admin = extract(&state, Some(&format!("{COOKIE_NAME}={token}"))).await.unwrap();
    assert_eq!(admin.token, token);
}

#[tokio::test]
async fn extractor_rejects_missing_or_unknown_cookie() {
    let state = test_app_state().await;
    assert_eq!(extract(&state, None).await.err(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(
        extract(&state, Some(&format!("{COOKIE_NAME}=deadbeef"))).await.err(),
        Some(StatusCode::UNAUTHORIZED)
    );
}

#[tokio::test]
async fn logout_revokes_and_expires_cookie() {
    let state = test_app_state().await;
    let token = state.sessions.create();

    let response = logout(State(state.clone()), AdminSession { token: token.clone() }).await.into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
    assert!(!state.sessions.validate(&token));
}

#[tokio::test]
async fn extractor_rejects_expired_session() {
    let state = AppState {
        sessions: crate::services::session::AdminSessions::with_ttl(std::time::Duration::from_millis(20)),
        ..test_app_state().await
    };
    let token = state.sessions.create();
    let cookie = format!("{COOKIE_NAME}={token}");
    assert!(extract(&state, Some(&cookie)).await.is_ok());

    tokio::time::sleep(std::time::Duration::from_millis(40)).await;
    assert_eq!(extract(&state, Some(&cookie)).await.err(), Some(StatusCode::UNAUTHORIZED));
}
