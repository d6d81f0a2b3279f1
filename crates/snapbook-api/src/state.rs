//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use snapbook_auth::{AuthService, JwtDecoder};
use snapbook_core::config::AppConfig;
use snapbook_realtime::{ChatHub, DashboardHub, MetricsSource};
use snapbook_store::AccountStore;

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Account store collaborator.
    pub accounts: Arc<dyn AccountStore>,
    /// Login/registration/refresh orchestration.
    pub auth: Arc<AuthService>,
    /// Access-token validation for the session guard.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Chat/location hub.
    pub chat_hub: Arc<ChatHub>,
    /// Dashboard hub.
    pub dashboard_hub: Arc<DashboardHub>,
    /// Metrics source collaborator.
    pub metrics: Arc<dyn MetricsSource>,
    /// Per-caller request rate limiter.
    pub rate_limiter: Arc<RateLimiter>,
}
