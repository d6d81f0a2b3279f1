//! PostgreSQL connection pool setup.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use snapbook_core::config::DatabaseConfig;
use snapbook_core::error::{AppError, ErrorKind};

/// Create a PostgreSQL connection pool from configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to connect to database", e)
        })?;

    info!(max_connections = config.max_connections, "Database pool created");
    Ok(pool)
}
