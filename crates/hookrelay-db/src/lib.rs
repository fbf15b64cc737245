//! Persistence layer for hookrelay.
//!
//! Exposes typed models for the `accounts` and `destinations` tables along
//! with pool construction and embedded migrations. Storage column names stay
//! inside this crate; callers only ever see the typed records.

pub mod error;
pub mod models;

pub use error::DbError;
pub use models::{
    Account, CreateAccount, CreateDestination, Destination, UpdateAccountFields,
    UpdateDestinationFields,
};

use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Embedded migrations, applied at startup.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a connection pool with bounded size and acquire timeout.
///
/// # Errors
///
/// Returns `DbError::ConnectionFailed` if the database is unreachable or the
/// credentials are invalid.
pub async fn create_pool(database_url: &str) -> Result<PgPool, DbError> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .map_err(DbError::ConnectionFailed)
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `DbError::MigrationFailed` if a migration cannot be applied.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    MIGRATOR.run(pool).await.map_err(DbError::MigrationFailed)?;
    tracing::info!(target: "db", "Migrations applied");
    Ok(())
}
