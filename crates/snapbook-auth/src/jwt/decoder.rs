//! JWT token validation.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

use snapbook_core::config::auth::AuthConfig;
use snapbook_core::AppError;

use super::claims::Claims;

/// Validates JWT tokens and enforces the access/refresh discriminator.
///
/// All failure modes (bad signature, expiry, wrong discriminator) collapse
/// into one user-visible message so callers cannot probe which check failed;
/// the detail goes to the debug log only.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    ///
    /// Checks:
    /// 1. Signature validity
    /// 2. Expiration
    /// 3. The token is not a refresh token
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims =
            self.decode_token(token, || AppError::authentication("Could not validate credentials"))?;

        if claims.is_refresh {
            debug!(sub = %claims.sub, "Refresh token presented where access token required");
            return Err(AppError::authentication("Could not validate credentials"));
        }

        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token, || AppError::authentication("Invalid refresh token"))?;

        if !claims.is_refresh {
            debug!(sub = %claims.sub, "Access token presented where refresh token required");
            return Err(AppError::authentication("Invalid refresh token"));
        }

        Ok(claims)
    }

    /// Internal decode without discriminator checking.
    fn decode_token(
        &self,
        token: &str,
        reject: impl Fn() -> AppError,
    ) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                debug!(error = %e, "Token validation failed");
                reject()
            })?;

        Ok(token_data.claims)
    }
}
