//! The session guard — bearer extraction, token validation, account
//! resolution, and policy checks, as axum extractors.
//!
//! `CurrentAccount` performs the base chain; `ActiveAccount` and
//! `AdminAccount` layer policies on top. Every failure short-circuits the
//! request before the handler runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use snapbook_auth::Claims;
use snapbook_core::AppError;
use snapbook_store::Account;

use crate::state::AppState;

/// An authenticated account context.
///
/// Produced by a validated access token whose subject resolves to a stored
/// account. A missing account and a bad signature are indistinguishable to
/// the caller.
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    /// The resolved account record.
    pub account: Account,
    /// The validated token claims.
    pub claims: Claims,
}

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract Bearer token from Authorization header
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Could not validate credentials"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Could not validate credentials"))?;

        // Signature + expiry + refresh-discriminator rejection
        let claims = state.jwt_decoder.decode_access_token(token)?;

        // Resolve the subject; an unknown account reads like a bad token
        let account = state
            .accounts
            .find_by_identity(&claims.sub)
            .await?
            .ok_or_else(|| AppError::authentication("Could not validate credentials"))?;

        Ok(CurrentAccount { account, claims })
    }
}

/// `CurrentAccount` plus the rate-limit and active-account policies.
#[derive(Debug, Clone)]
pub struct ActiveAccount(pub Account);

impl FromRequestParts<AppState> for ActiveAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = CurrentAccount::from_request_parts(parts, state).await?;

        if !state.rate_limiter.check(&current.account.email) {
            return Err(AppError::rate_limit("Too many requests"));
        }

        if !current.account.is_active {
            return Err(AppError::validation("Inactive user"));
        }

        Ok(ActiveAccount(current.account))
    }
}

/// `CurrentAccount` plus the admin-required policy.
///
/// The check reads the live account record, not the token's admin snapshot.
#[derive(Debug, Clone)]
pub struct AdminAccount(pub Account);

impl FromRequestParts<AppState> for AdminAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = CurrentAccount::from_request_parts(parts, state).await?;

        if !current.account.is_admin {
            return Err(AppError::authorization("Not enough permissions"));
        }

        Ok(AdminAccount(current.account))
    }
}
