//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use snapbook_store::AccountKind;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address (identity).
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    /// Plaintext password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Account kind.
    pub kind: AccountKind,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Google sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleLoginRequest {
    /// Google-issued ID token.
    pub id_token: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Alert broadcast request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AlertRequest {
    /// Alert classification.
    #[validate(length(min = 1, message = "Alert type is required"))]
    pub alert_type: String,
    /// Alert text.
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

/// Admin announcement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementRequest {
    /// Arbitrary announcement payload.
    pub message: serde_json::Value,
}
