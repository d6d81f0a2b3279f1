//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use snapbook_api::middleware::rate_limit::RateLimiter;
use snapbook_api::state::AppState;
use snapbook_auth::{AuthService, GoogleTokenVerifier, JwtDecoder, JwtEncoder, PasswordHasher};
use snapbook_core::config::AppConfig;
use snapbook_realtime::{ChatHub, DashboardHub, HubMetricsSource, MetricsSource};
use snapbook_store::{AccountKind, AccountStore, MemoryAccountStore, NewAccount};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory account store for direct fixture setup
    pub store: Arc<MemoryAccountStore>,
    /// Chat hub, for registering identities without a socket
    pub chat_hub: Arc<ChatHub>,
    /// Application config
    pub config: AppConfig,
}

/// A captured test response: status plus parsed JSON body.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Create a test application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(MemoryAccountStore::new());
        let accounts: Arc<dyn AccountStore> = store.clone();

        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let auth = Arc::new(AuthService::new(
            Arc::clone(&accounts),
            PasswordHasher::new(),
            JwtEncoder::new(&config.auth),
            JwtDecoder::new(&config.auth),
            GoogleTokenVerifier::new(&config.google),
        ));

        let chat_hub = Arc::new(ChatHub::new());
        let dashboard_hub = Arc::new(DashboardHub::new());
        let metrics: Arc<dyn MetricsSource> = Arc::new(HubMetricsSource::new(
            Arc::clone(&chat_hub),
            Arc::clone(&dashboard_hub),
        ));
        let rate_limiter = Arc::new(RateLimiter::new(&config.rate_limit));

        let state = AppState {
            config: Arc::new(config.clone()),
            accounts,
            auth,
            jwt_decoder,
            chat_hub: Arc::clone(&chat_hub),
            dashboard_hub,
            metrics,
            rate_limiter,
        };

        Self {
            router: snapbook_api::build_router(state),
            store,
            chat_hub,
            config,
        }
    }

    /// Issue a request against the router and capture the response.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("request built"),
            None => builder.body(Body::empty()).expect("request built"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router served the request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collected")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create an account directly in the store with a real password hash.
    pub async fn create_account(&self, email: &str, password: &str, kind: AccountKind) {
        let hash = PasswordHasher::new()
            .hash_password(password)
            .expect("password hashed");
        self.store
            .create(NewAccount {
                email: email.to_string(),
                full_name: "Test Account".to_string(),
                password_hash: hash,
                kind,
            })
            .await
            .expect("account created");
    }

    /// Log in and return the access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/token",
                Some(serde_json::json!({"email": email, "password": password})),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        response.body["data"]["access_token"]
            .as_str()
            .expect("access token present")
            .to_string()
    }

    /// Log in and return the full token pair (access, refresh).
    pub async fn login_pair(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/api/auth/token",
                Some(serde_json::json!({"email": email, "password": password})),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        let data = &response.body["data"];
        (
            data["access_token"].as_str().unwrap().to_string(),
            data["refresh_token"].as_str().unwrap().to_string(),
        )
    }
}
