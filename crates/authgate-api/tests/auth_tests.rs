//! Register, login, and introspection flows over HTTP.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use authgate_auth::identity::IdentityStore;
use common::{PASSWORD, TestApp, cookie_value};

fn register_body(email: &str) -> serde_json::Value {
    json!({
        "firstName": "A",
        "lastName": "B",
        "email": email,
        "password": PASSWORD,
    })
}

#[tokio::test]
async fn register_creates_identity_session_and_cookies() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/auth/register", Some(register_body("a@b.com")), None, None)
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["data"]["id"].as_i64().unwrap();

    // Identity and session row persisted.
    let stored = app.identities.find_by_email("a@b.com").await.unwrap().unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(app.sessions.len().await, 1);

    // Both cookies set, with the right attributes.
    let access = cookie_value(&response.set_cookies, "accessToken").unwrap();
    let refresh = cookie_value(&response.set_cookies, "refreshToken").unwrap();
    for header in &response.set_cookies {
        assert!(header.contains("HttpOnly"), "not HttpOnly: {header}");
        assert!(header.contains("SameSite=Strict"), "not strict: {header}");
    }

    // Cookies hold syntactically valid signed tokens for this identity.
    let access_claims = app.decoder.verify_access(&access).unwrap();
    assert_eq!(access_claims.user_id().unwrap(), id);

    let refresh_claims = app.decoder.verify_refresh(&refresh).unwrap();
    assert_eq!(refresh_claims.user_id().unwrap(), id);
}

#[tokio::test]
async fn register_duplicate_email_is_reported() {
    let app = TestApp::new();
    app.request("POST", "/api/auth/register", Some(register_body("a@b.com")), None, None)
        .await;

    let response = app
        .request("POST", "/api/auth/register", Some(register_body("a@b.com")), None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    // Registration names the duplicate; login never would.
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("already registered")
    );
    assert_eq!(app.sessions.len().await, 1);
}

#[tokio::test]
async fn register_rejects_invalid_payload() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "firstName": "A",
                "lastName": "B",
                "email": "not-an-email",
                "password": PASSWORD,
            })),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "firstName": "A",
                "lastName": "B",
                "email": "a@b.com",
                "password": "short",
            })),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.sessions.len().await, 0);
}

#[tokio::test]
async fn login_sets_fresh_cookies() {
    let app = TestApp::new();
    app.seed_user("a@b.com", authgate_entity::user::UserRole::Customer)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({"email": "a@b.com", "password": PASSWORD})),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(cookie_value(&response.set_cookies, "accessToken").is_some());
    assert!(cookie_value(&response.set_cookies, "refreshToken").is_some());
    assert_eq!(app.sessions.len().await, 1);
}

#[tokio::test]
async fn login_failures_share_status_and_shape() {
    let app = TestApp::new();
    app.seed_user("a@b.com", authgate_entity::user::UserRole::Customer)
        .await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({"email": "a@b.com", "password": "wrong-password"})),
            None,
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({"email": "nobody@b.com", "password": PASSWORD})),
            None,
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_email.status, StatusCode::BAD_REQUEST);
    // Identical body: the caller cannot tell which half was wrong.
    assert_eq!(wrong_password.body, unknown_email.body);
    // Neither failure issued a session.
    assert_eq!(app.sessions.len().await, 0);
}

#[tokio::test]
async fn whoami_works_with_bearer_header() {
    let app = TestApp::new();
    app.seed_user("a@b.com", authgate_entity::user::UserRole::Customer)
        .await;
    let token = app.login_token("a@b.com").await;

    let response = app
        .request("GET", "/api/auth/self", None, Some(&token), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "a@b.com");
    // The password digest never appears in a response.
    assert!(response.body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn whoami_falls_back_to_access_cookie() {
    let app = TestApp::new();
    app.seed_user("a@b.com", authgate_entity::user::UserRole::Customer)
        .await;
    let token = app.login_token("a@b.com").await;

    let cookie = format!("accessToken={token}");
    let response = app
        .request("GET", "/api/auth/self", None, None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn whoami_rejects_missing_or_bad_credentials() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/self", None, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/auth/self", None, Some("garbage"), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // The literal "undefined" placeholder counts as no credential.
    let response = app
        .request("GET", "/api/auth/self", None, Some("undefined"), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_rejection_reason_is_not_leaked() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/auth/self", None, None, None).await;
    let garbage = app
        .request("GET", "/api/auth/self", None, Some("garbage"), None)
        .await;

    assert_eq!(missing.body, garbage.body);
}
