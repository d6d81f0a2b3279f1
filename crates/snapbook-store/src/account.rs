//! Account entity model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use snapbook_core::AppError;

/// A registered account in the Snapbook marketplace.
///
/// The email address is the account's stable identity: token subjects,
/// realtime registrations, and store lookups are all keyed by it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Email address (identity, unique).
    pub email: String,
    /// Human-readable display name.
    pub full_name: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether this account is a customer or a photographer.
    pub kind: AccountKind,
    /// Deactivated accounts cannot authenticate.
    pub is_active: bool,
    /// Whether the account holds admin privileges.
    pub is_admin: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The two kinds of marketplace accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Books photographers.
    Customer,
    /// Offers photography services and shares live location.
    Photographer,
}

impl AccountKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Photographer => "photographer",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "photographer" => Ok(Self::Photographer),
            _ => Err(AppError::validation(format!(
                "Invalid account kind: '{s}'. Expected one of: customer, photographer"
            ))),
        }
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    /// Email address (identity).
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Account kind.
    pub kind: AccountKind,
}
