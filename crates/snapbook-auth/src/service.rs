//! Login, registration, and refresh flows.

use std::sync::Arc;

use tracing::{debug, info};

use snapbook_core::{AppError, AppResult};
use snapbook_store::{Account, AccountKind, AccountStore, NewAccount};

use crate::google::GoogleTokenVerifier;
use crate::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use crate::password::PasswordHasher;

/// Data required to register a new account.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Email address (identity).
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Plaintext password; hashed before it reaches the store.
    pub password: String,
    /// Account kind.
    pub kind: AccountKind,
}

/// Orchestrates credential verification and token issuance.
///
/// Unknown identities and bad passwords collapse into one user-visible
/// message so callers cannot enumerate registered emails.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    google: GoogleTokenVerifier,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish()
    }
}

impl AuthService {
    /// Creates a new service with all required dependencies.
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: PasswordHasher,
        encoder: JwtEncoder,
        decoder: JwtDecoder,
        google: GoogleTokenVerifier,
    ) -> Self {
        Self {
            store,
            hasher,
            encoder,
            decoder,
            google,
        }
    }

    /// Registers a new account with a hashed password.
    pub async fn register(&self, registration: Registration) -> AppResult<Account> {
        let password_hash = self.hash_blocking(registration.password).await?;

        let account = self
            .store
            .create(NewAccount {
                email: registration.email,
                full_name: registration.full_name,
                password_hash,
                kind: registration.kind,
            })
            .await?;

        info!(account = %account.email, kind = %account.kind, "Account registered");
        Ok(account)
    }

    /// Verifies credentials and issues an access + refresh token pair.
    ///
    /// The admin flag baked into the pair is the account's current stored
    /// state at login time.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<TokenPair> {
        let account = self
            .store
            .find_by_identity(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let password = password.to_string();
        let hash = account.password_hash.clone();
        let valid = self
            .verify_blocking(password, hash)
            .await?;

        if !valid {
            debug!(account = %account.email, "Password mismatch");
            return Err(invalid_credentials());
        }

        self.issue_for(&account)
    }

    /// Verifies a Google ID token and issues a token pair for the matching
    /// account. Unknown emails are rejected; there is no implicit signup.
    pub async fn login_google(&self, id_token: &str) -> AppResult<TokenPair> {
        let claims = self.google.verify(id_token).await?;

        let account = self
            .store
            .find_by_identity(&claims.email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid Google token"))?;

        self.issue_for(&account)
    }

    /// Exchanges a refresh token for a fresh token pair.
    ///
    /// The new pair carries the account's *current* admin flag, re-read from
    /// the store — never the snapshot inside the old token.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let account = self
            .store
            .find_by_identity(&claims.sub)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid refresh token"))?;

        self.encoder.issue_pair(&account.email, account.is_admin)
    }

    fn issue_for(&self, account: &Account) -> AppResult<TokenPair> {
        if !account.is_active {
            return Err(AppError::validation("Inactive user"));
        }
        let pair = self.encoder.issue_pair(&account.email, account.is_admin)?;
        info!(account = %account.email, "Token pair issued");
        Ok(pair)
    }

    /// Runs Argon2 hashing off the async worker threads.
    async fn hash_blocking(&self, password: String) -> AppResult<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))?
    }

    /// Runs Argon2 verification off the async worker threads.
    async fn verify_blocking(&self, password: String, hash: String) -> AppResult<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))?
    }
}

fn invalid_credentials() -> AppError {
    AppError::authentication("Invalid email or password")
}
