//! Route definitions for the Snapbook HTTP API.
//!
//! All REST routes are mounted under `/api`; WebSocket endpoints live under
//! `/ws`. The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::http::HeaderValue;
use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(dashboard_routes())
        .merge(health_routes());

    let ws_routes = Router::new()
        .route("/ws/chat", get(handlers::ws::chat_ws))
        .route("/ws/dashboard/{category}", get(handlers::ws::dashboard_ws));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, token, google, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/token", post(handlers::auth::login))
        .route("/auth/google", post(handlers::auth::login_google))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// Admin dashboard endpoints
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(handlers::dashboard::stats))
        .route("/dashboard/alerts", post(handlers::dashboard::broadcast_alert))
        .route(
            "/dashboard/announcements",
            post(handlers::dashboard::send_announcement),
        )
}

/// Health endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.server.cors.allowed_origins;

    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}
