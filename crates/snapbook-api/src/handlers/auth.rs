//! Auth handlers — register, login, Google sign-in, refresh, me.

use axum::extract::State;
use axum::Json;
use validator::Validate;

use snapbook_auth::service::Registration;
use snapbook_auth::TokenPair;
use snapbook_core::AppError;

use crate::dto::request::{GoogleLoginRequest, LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{AccountResponse, ApiResponse};
use crate::extractors::ActiveAccount;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let account = state
        .auth
        .register(Registration {
            email: req.email,
            full_name: req.full_name,
            password: req.password,
            kind: req.kind,
        })
        .await?;

    Ok(Json(ApiResponse::ok(account.into())))
}

/// POST /api/auth/token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let pair = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(pair)))
}

/// POST /api/auth/google
pub async fn login_google(
    State(state): State<AppState>,
    Json(req): Json<GoogleLoginRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, AppError> {
    let pair = state.auth.login_google(&req.id_token).await?;
    Ok(Json(ApiResponse::ok(pair)))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, AppError> {
    let pair = state.auth.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(pair)))
}

/// GET /api/auth/me
pub async fn me(
    ActiveAccount(account): ActiveAccount,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    Ok(Json(ApiResponse::ok(account.into())))
}
