//! Refresh rotation and logout flows over HTTP.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{PASSWORD, TestApp, cookie_value};

/// Register a user and return the refresh cookie header value.
async fn register_and_get_refresh(app: &TestApp, email: &str) -> String {
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "firstName": "A",
                "lastName": "B",
                "email": email,
                "password": PASSWORD,
            })),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    cookie_value(&response.set_cookies, "refreshToken").unwrap()
}

#[tokio::test]
async fn refresh_rotates_the_session() {
    let app = TestApp::new();
    let old_refresh = register_and_get_refresh(&app, "a@b.com").await;
    let old_id = app
        .decoder
        .verify_refresh(&old_refresh)
        .unwrap()
        .session_id()
        .unwrap();

    let cookie = format!("refreshToken={old_refresh}");
    let response = app
        .request("POST", "/api/auth/refresh", None, None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let new_refresh = cookie_value(&response.set_cookies, "refreshToken").unwrap();
    let new_id = app
        .decoder
        .verify_refresh(&new_refresh)
        .unwrap()
        .session_id()
        .unwrap();

    // The embedded id rotated and exactly one session remains.
    assert_ne!(old_id, new_id);
    assert_eq!(app.sessions.len().await, 1);

    // Replaying the consumed token must fail: its row is gone.
    let replay = app
        .request("POST", "/api/auth/refresh", None, None, Some(&cookie))
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_requires_the_cookie() {
    let app = TestApp::new();
    let refresh = register_and_get_refresh(&app, "a@b.com").await;

    // No cookie at all.
    let response = app.request("POST", "/api/auth/refresh", None, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // A refresh token in the Authorization header must not be accepted:
    // the refresh credential travels only in its cookie.
    let response = app
        .request("POST", "/api/auth/refresh", None, Some(&refresh), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_rejects_tampered_tokens() {
    let app = TestApp::new();
    let refresh = register_and_get_refresh(&app, "a@b.com").await;

    let mut tampered = refresh.clone();
    tampered.pop();
    tampered.push('A');

    let cookie = format!("refreshToken={tampered}");
    let response = app
        .request("POST", "/api/auth/refresh", None, None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_and_clears_cookies() {
    let app = TestApp::new();
    let refresh = register_and_get_refresh(&app, "a@b.com").await;
    let cookie = format!("refreshToken={refresh}");

    let response = app
        .request("POST", "/api/auth/logout", None, None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.sessions.len().await, 0);

    // Both cookies cleared.
    for name in ["accessToken", "refreshToken"] {
        let header = response
            .set_cookies
            .iter()
            .find(|h| h.starts_with(&format!("{name}=")))
            .unwrap();
        assert!(header.contains("Max-Age=0"), "not cleared: {header}");
    }

    // Replaying the revoked token on refresh is rejected.
    let replay = app
        .request("POST", "/api/auth/refresh", None, None, Some(&cookie))
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);

    // And logout itself cannot be repeated with the revoked token.
    let replay = app
        .request("POST", "/api/auth/logout", None, None, Some(&cookie))
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sessions_are_independent_across_devices() {
    let app = TestApp::new();
    let first = register_and_get_refresh(&app, "a@b.com").await;

    // Second device logs in.
    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({"email": "a@b.com", "password": PASSWORD})),
            None,
            None,
        )
        .await;
    let second = cookie_value(&login.set_cookies, "refreshToken").unwrap();
    assert_eq!(app.sessions.len().await, 2);

    // Logging out the first device leaves the second usable.
    let cookie = format!("refreshToken={first}");
    app.request("POST", "/api/auth/logout", None, None, Some(&cookie))
        .await;

    let cookie = format!("refreshToken={second}");
    let response = app
        .request("POST", "/api/auth/refresh", None, None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
