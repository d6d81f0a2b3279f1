//! Integration tests for the session guard's failure modes and policies.

mod helpers;

use http::StatusCode;
use snapbook_core::config::rate_limit::RateLimitConfig;
use snapbook_core::config::AppConfig;
use snapbook_store::{AccountKind, AccountStore};

#[tokio::test]
async fn test_missing_authorization_header() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", "/api/auth/me", None, Some("garbage.token.here"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_rejected_on_access_endpoint() {
    let app = helpers::TestApp::new();
    app.create_account("eve@example.com", "password123", AccountKind::Customer)
        .await;
    let (_access, refresh) = app.login_pair("eve@example.com", "password123").await;

    // Structurally valid, correctly signed, unexpired — but the wrong kind.
    let response = app
        .request("GET", "/api/auth/me", None, Some(&refresh))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_subject_reads_like_a_bad_token() {
    let app = helpers::TestApp::new();

    // A correctly signed access token for an identity the store has never
    // seen.
    let encoder = snapbook_auth::JwtEncoder::new(&app.config.auth);
    let pair = encoder.issue_pair("phantom@example.com", false).unwrap();

    let unknown_subject = app
        .request("GET", "/api/auth/me", None, Some(&pair.access_token))
        .await;
    let bad_signature = app
        .request("GET", "/api/auth/me", None, Some("junk.junk.junk"))
        .await;

    assert_eq!(unknown_subject.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        unknown_subject.body["message"], bad_signature.body["message"],
        "account absence must be indistinguishable from a bad signature"
    );
}

#[tokio::test]
async fn test_inactive_account_rejected_with_400() {
    let app = helpers::TestApp::new();
    app.create_account("idle@example.com", "password123", AccountKind::Customer)
        .await;
    let token = app.login("idle@example.com", "password123").await;

    app.store.set_active("idle@example.com", false).await.unwrap();

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_admin_forbidden_on_admin_endpoint() {
    let app = helpers::TestApp::new();
    app.create_account("plain@example.com", "password123", AccountKind::Photographer)
        .await;
    let token = app.login("plain@example.com", "password123").await;

    let response = app
        .request("GET", "/api/dashboard/stats", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rate_limit_exhaustion_returns_429() {
    let config = AppConfig {
        rate_limit: RateLimitConfig {
            max_requests: 2,
            window_seconds: 60,
        },
        ..AppConfig::default()
    };
    let app = helpers::TestApp::with_config(config);
    app.create_account("busy@example.com", "password123", AccountKind::Customer)
        .await;
    let token = app.login("busy@example.com", "password123").await;

    for _ in 0..2 {
        let ok = app.request("GET", "/api/auth/me", None, Some(&token)).await;
        assert_eq!(ok.status, StatusCode::OK);
    }

    let limited = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
}
