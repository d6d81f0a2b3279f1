//! JWT token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use snapbook_core::config::auth::AuthConfig;
use snapbook_core::AppError;

use super::claims::Claims;

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

/// An access + refresh token pair, as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Always the literal `"bearer"`.
    pub token_type: String,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        }
    }

    /// Generates a new access + refresh token pair for the given identity.
    ///
    /// Both tokens share the subject and the admin snapshot; they differ in
    /// expiry and in the `is_refresh` discriminator.
    pub fn issue_pair(&self, identity: &str, is_admin: bool) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let access_exp = now + chrono::Duration::minutes(self.access_ttl_minutes);
        let refresh_exp = now + chrono::Duration::days(self.refresh_ttl_days);

        let access_claims = Claims {
            sub: identity.to_string(),
            iat: now.timestamp(),
            exp: access_exp.timestamp(),
            is_admin,
            is_refresh: false,
        };

        let refresh_claims = Claims {
            sub: identity.to_string(),
            iat: now.timestamp(),
            exp: refresh_exp.timestamp(),
            is_admin,
            is_refresh: true,
        };

        Ok(TokenPair {
            access_token: self.sign(&access_claims)?,
            refresh_token: self.sign(&refresh_claims)?,
            token_type: "bearer".to_string(),
        })
    }

    /// Signs a prepared claim set.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
