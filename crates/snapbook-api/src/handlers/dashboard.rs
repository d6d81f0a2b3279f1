//! Admin dashboard handlers — stats, alerts, announcements.

use axum::extract::State;
use axum::Json;
use validator::Validate;

use snapbook_core::AppError;
use snapbook_realtime::MetricsSnapshot;

use crate::dto::request::{AlertRequest, AnnouncementRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AdminAccount;
use crate::state::AppState;

/// GET /api/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    _admin: AdminAccount,
) -> Result<Json<ApiResponse<MetricsSnapshot>>, AppError> {
    let snapshot = state.metrics.current_snapshot().await;
    Ok(Json(ApiResponse::ok(snapshot)))
}

/// POST /api/dashboard/alerts
pub async fn broadcast_alert(
    State(state): State<AppState>,
    _admin: AdminAccount,
    Json(req): Json<AlertRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .dashboard_hub
        .broadcast_alert(&req.alert_type, &req.message);

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Alert broadcast".to_string(),
    })))
}

/// POST /api/dashboard/announcements
pub async fn send_announcement(
    State(state): State<AppState>,
    _admin: AdminAccount,
    Json(req): Json<AnnouncementRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.dashboard_hub.send_admin_message(req.message);

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Announcement sent".to_string(),
    })))
}
