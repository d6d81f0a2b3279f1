//! In-memory account store used by tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use snapbook_core::{AppError, AppResult};

use crate::account::{Account, NewAccount};
use crate::store::AccountStore;

/// Account store keeping everything in a process-local map.
///
/// Keys are lowercased emails so lookups match the case-insensitive
/// behavior of the PostgreSQL implementation.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_identity(&self, identity: &str) -> AppResult<Option<Account>> {
        let accounts = self.accounts.read().expect("account map poisoned");
        Ok(accounts.get(&identity.to_lowercase()).cloned())
    }

    async fn create(&self, account: NewAccount) -> AppResult<Account> {
        let mut accounts = self.accounts.write().expect("account map poisoned");
        let key = account.email.to_lowercase();
        if accounts.contains_key(&key) {
            return Err(AppError::conflict(
                "An account with this email already exists",
            ));
        }

        let now = Utc::now();
        let created = Account {
            id: Uuid::new_v4(),
            email: account.email,
            full_name: account.full_name,
            password_hash: account.password_hash,
            kind: account.kind,
            is_active: true,
            is_admin: false,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(key, created.clone());
        Ok(created)
    }

    async fn set_admin(&self, identity: &str, is_admin: bool) -> AppResult<()> {
        let mut accounts = self.accounts.write().expect("account map poisoned");
        let account = accounts
            .get_mut(&identity.to_lowercase())
            .ok_or_else(|| AppError::not_found("Account not found"))?;
        account.is_admin = is_admin;
        account.updated_at = Utc::now();
        Ok(())
    }

    async fn set_active(&self, identity: &str, is_active: bool) -> AppResult<()> {
        let mut accounts = self.accounts.write().expect("account map poisoned");
        let account = accounts
            .get_mut(&identity.to_lowercase())
            .ok_or_else(|| AppError::not_found("Account not found"))?;
        account.is_active = is_active;
        account.updated_at = Utc::now();
        Ok(())
    }
}
