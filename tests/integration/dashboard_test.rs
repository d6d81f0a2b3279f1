//! Integration tests for the admin dashboard surface and health check.

mod helpers;

use http::StatusCode;
use snapbook_store::{AccountKind, AccountStore};
use uuid::Uuid;

async fn admin_token(app: &helpers::TestApp) -> String {
    app.create_account("admin@example.com", "password123", AccountKind::Customer)
        .await;
    app.store.set_admin("admin@example.com", true).await.unwrap();
    app.login("admin@example.com", "password123").await
}

#[tokio::test]
async fn test_health_check() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"].as_str().unwrap(), "ok");
}

#[tokio::test]
async fn test_stats_requires_authentication() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/dashboard/stats", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stats_reports_hub_counters() {
    let app = helpers::TestApp::new();
    let token = admin_token(&app).await;

    // Bind an identity on the chat hub as a live socket would.
    let (tx, _rx) = tokio::sync::mpsc::channel(8);
    let handle = std::sync::Arc::new(snapbook_realtime::ConnectionHandle::new(tx));
    app.chat_hub.connect(handle.clone());
    app.chat_hub.register(handle.id, "online@example.com");

    let response = app
        .request("GET", "/api/dashboard/stats", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["active_users"].as_u64().unwrap(), 1);
    assert_eq!(data["system_health"].as_str().unwrap(), "good");
}

#[tokio::test]
async fn test_alert_broadcast_is_admin_only() {
    let app = helpers::TestApp::new();
    app.create_account("user@example.com", "password123", AccountKind::Customer)
        .await;
    let user_token = app.login("user@example.com", "password123").await;

    let body = serde_json::json!({"alert_type": "capacity", "message": "queue backed up"});

    let forbidden = app
        .request("POST", "/api/dashboard/alerts", Some(body.clone()), Some(&user_token))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let token = admin_token(&app).await;
    let allowed = app
        .request("POST", "/api/dashboard/alerts", Some(body), Some(&token))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_alert_with_empty_message_rejected() {
    let app = helpers::TestApp::new();
    let token = admin_token(&app).await;

    let response = app
        .request(
            "POST",
            "/api/dashboard/alerts",
            Some(serde_json::json!({"alert_type": "capacity", "message": ""})),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_announcement_accepts_arbitrary_payload() {
    let app = helpers::TestApp::new();
    let token = admin_token(&app).await;

    let response = app
        .request(
            "POST",
            "/api/dashboard/announcements",
            Some(serde_json::json!({
                "message": {"notice": "maintenance", "window_id": Uuid::new_v4()}
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_ws_routes_reject_plain_http_requests() {
    let app = helpers::TestApp::new();

    let chat = app.request("GET", "/ws/chat", None, None).await;
    let dashboard = app.request("GET", "/ws/dashboard/metrics", None, None).await;

    // Without upgrade headers the handshake cannot complete.
    assert!(chat.status.is_client_error(), "got {}", chat.status);
    assert!(dashboard.status.is_client_error(), "got {}", dashboard.status);
}
