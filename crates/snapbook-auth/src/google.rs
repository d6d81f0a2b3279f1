//! Google ID-token verification.

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use snapbook_core::config::google::GoogleConfig;
use snapbook_core::AppError;

/// Issuers Google is allowed to use in its ID tokens.
const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Claims extracted from a verified Google ID token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleClaims {
    /// Token issuer.
    pub iss: String,
    /// Audience — must equal the configured client ID.
    pub aud: String,
    /// Google's stable subject identifier.
    pub sub: String,
    /// Verified email address.
    pub email: String,
    /// Whether Google has verified the email.
    #[serde(default)]
    pub email_verified: bool,
    /// Display name, when present.
    #[serde(default)]
    pub name: Option<String>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// One RSA key from Google's JWKS document.
#[derive(Debug, Clone, Deserialize)]
struct GoogleJwk {
    kid: String,
    n: String,
    e: String,
}

#[derive(Debug, Clone, Deserialize)]
struct GoogleKeySet {
    keys: Vec<GoogleJwk>,
}

/// Verifies Google-issued ID tokens against the published signing keys.
///
/// Every validation failure (unknown key, bad signature, wrong audience,
/// disallowed issuer) collapses into the same authentication error.
#[derive(Debug, Clone)]
pub struct GoogleTokenVerifier {
    client_id: String,
    certs_url: String,
    http: reqwest::Client,
}

impl GoogleTokenVerifier {
    /// Creates a new verifier from Google configuration.
    pub fn new(config: &GoogleConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            certs_url: config.certs_url.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Verifies a raw ID token and returns its claims.
    pub async fn verify(&self, token: &str) -> Result<GoogleClaims, AppError> {
        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "Google token header unreadable");
            invalid_token()
        })?;
        let kid = header.kid.ok_or_else(invalid_token)?;

        let keys = self.fetch_keys().await?;
        let jwk = keys
            .keys
            .iter()
            .find(|k| k.kid == kid)
            .ok_or_else(invalid_token)?;

        let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e).map_err(|e| {
            debug!(error = %e, "Google JWKS key rejected");
            invalid_token()
        })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.client_id.as_str()]);
        validation.set_issuer(&GOOGLE_ISSUERS);

        let data = decode::<GoogleClaims>(token, &key, &validation).map_err(|e| {
            debug!(error = %e, "Google token validation failed");
            invalid_token()
        })?;

        Ok(data.claims)
    }

    /// Fetches the current Google signing key set.
    async fn fetch_keys(&self) -> Result<GoogleKeySet, AppError> {
        self.http
            .get(&self.certs_url)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Failed to fetch Google keys: {e}")))?
            .json::<GoogleKeySet>()
            .await
            .map_err(|e| AppError::external_service(format!("Malformed Google key set: {e}")))
    }
}

fn invalid_token() -> AppError {
    AppError::authentication("Invalid Google token")
}
