//! Integration tests for registration, login, and refresh flows.

mod helpers;

use http::StatusCode;
use snapbook_store::{AccountKind, AccountStore};

#[tokio::test]
async fn test_register_then_login() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "alice@example.com",
                "full_name": "Alice Archer",
                "password": "password123",
                "kind": "customer",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response.body["data"]["email"].as_str().unwrap(),
        "alice@example.com"
    );
    assert!(response.body["data"]["password_hash"].is_null());

    let response = app
        .request(
            "POST",
            "/api/auth/token",
            Some(serde_json::json!({
                "email": "alice@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert!(data["access_token"].is_string());
    assert!(data["refresh_token"].is_string());
    assert_eq!(data["token_type"].as_str().unwrap(), "bearer");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = helpers::TestApp::new();
    app.create_account("taken@example.com", "password123", AccountKind::Customer)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "taken@example.com",
                "full_name": "Second Claimant",
                "password": "password123",
                "kind": "photographer",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_invalid_body() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "not-an-email",
                "full_name": "Nameless",
                "password": "short",
                "kind": "customer",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let app = helpers::TestApp::new();
    app.create_account("bob@example.com", "password123", AccountKind::Customer)
        .await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/token",
            Some(serde_json::json!({
                "email": "bob@example.com",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/token",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.body["message"], unknown_email.body["message"],
        "identity enumeration must not be possible"
    );
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = helpers::TestApp::new();
    app.create_account("carol@example.com", "password123", AccountKind::Customer)
        .await;
    let (access, _refresh) = app.login_pair("carol@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({"refresh_token": access})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_issues_fresh_pair() {
    let app = helpers::TestApp::new();
    app.create_account("dave@example.com", "password123", AccountKind::Photographer)
        .await;
    let (_access, refresh) = app.login_pair("dave@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({"refresh_token": refresh})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert!(data["access_token"].is_string());
    assert!(data["refresh_token"].is_string());

    // The new access token authenticates.
    let token = data["access_token"].as_str().unwrap();
    let me = app.request("GET", "/api/auth/me", None, Some(token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["email"].as_str().unwrap(), "dave@example.com");
}

#[tokio::test]
async fn test_admin_elevation_via_refresh_scenario() {
    let app = helpers::TestApp::new();
    app.create_account("alice@example.com", "password123", AccountKind::Customer)
        .await;

    let (access, refresh) = app.login_pair("alice@example.com", "password123").await;

    // Not an admin yet: the dashboard rejects her.
    let forbidden = app
        .request("GET", "/api/dashboard/stats", None, Some(&access))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    // Elevate in the store, then exchange the old refresh token.
    app.store.set_admin("alice@example.com", true).await.unwrap();

    let refreshed = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({"refresh_token": refresh})),
            None,
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);

    let new_access = refreshed.body["data"]["access_token"].as_str().unwrap();
    let allowed = app
        .request("GET", "/api/dashboard/stats", None, Some(new_access))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_for_vanished_account_rejected() {
    let app = helpers::TestApp::new();

    // A structurally valid refresh token whose subject was never registered.
    let encoder = snapbook_auth::JwtEncoder::new(&app.config.auth);
    let pair = encoder.issue_pair("ghost@example.com", false).unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({"refresh_token": pair.refresh_token})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
