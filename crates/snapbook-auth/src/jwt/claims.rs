//! JWT claims structure used in access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT claims payload embedded in every Snapbook token.
///
/// The `is_refresh` flag is the only discriminator between access and
/// refresh tokens; both carry the same subject and admin snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the account's email address.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Admin flag snapshot taken at issuance time.
    #[serde(default)]
    pub is_admin: bool,
    /// Whether this is a refresh token.
    #[serde(default)]
    pub is_refresh: bool,
}

impl Claims {
    /// Returns the subject identity (email).
    pub fn identity(&self) -> &str {
        &self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
