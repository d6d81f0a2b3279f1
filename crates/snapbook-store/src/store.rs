//! The account store collaborator interface.

use async_trait::async_trait;

use snapbook_core::AppResult;

use crate::account::{Account, NewAccount};

/// Interface the authentication core uses to read and write accounts.
///
/// Implemented by [`crate::PgAccountStore`] in production and
/// [`crate::MemoryAccountStore`] in tests. Identity lookups are
/// case-insensitive on the email address.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Find an account by its identity (email).
    async fn find_by_identity(&self, identity: &str) -> AppResult<Option<Account>>;

    /// Create a new account. Fails with a conflict when the identity is taken.
    async fn create(&self, account: NewAccount) -> AppResult<Account>;

    /// Set or clear the admin flag for an account.
    async fn set_admin(&self, identity: &str, is_admin: bool) -> AppResult<()>;

    /// Activate or deactivate an account.
    async fn set_active(&self, identity: &str, is_active: bool) -> AppResult<()>;
}
