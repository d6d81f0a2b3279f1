//! PostgreSQL account store implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use snapbook_core::error::{AppError, ErrorKind};
use snapbook_core::AppResult;

use crate::account::{Account, NewAccount};
use crate::store::AccountStore;

/// Account store backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    /// Create a new store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_identity(&self, identity: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE LOWER(email) = LOWER($1)")
            .bind(identity)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by email", e)
            })
    }

    async fn create(&self, account: NewAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (email, full_name, password_hash, kind) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&account.email)
        .bind(&account.full_name)
        .bind(&account.password_hash)
        .bind(account.kind)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation())
            {
                AppError::conflict("An account with this email already exists")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create account", e)
            }
        })
    }

    async fn set_admin(&self, identity: &str, is_admin: bool) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE accounts SET is_admin = $2, updated_at = now() \
             WHERE LOWER(email) = LOWER($1)",
        )
        .bind(identity)
        .bind(is_admin)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update admin flag", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Account not found"));
        }
        Ok(())
    }

    async fn set_active(&self, identity: &str, is_active: bool) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE accounts SET is_active = $2, updated_at = now() \
             WHERE LOWER(email) = LOWER($1)",
        )
        .bind(identity)
        .bind(is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update active flag", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Account not found"));
        }
        Ok(())
    }
}
