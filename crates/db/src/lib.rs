//! Data access for the portfolio backend.
//!
//! [`executor::Executor`] runs statements on the pool and normalizes results,
//! [`repository::Repository`] provides generic CRUD for any
//! [`entity::Entity`], and [`repositories`] adds the per-table queries.

#[macro_use]
pub mod entity;

pub mod config;
pub mod error;
pub mod executor;
pub mod json_column;
pub mod models;
pub mod repositories;
pub mod repository;
pub mod sql;
pub mod value;

pub use config::DbConfig;
pub use error::{DbError, ModelError};
pub use executor::{Executor, QueryOutcome, Statement, WriteResult};
pub use repository::Repository;
pub use value::{Record, SqlValue};

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a bounded connection pool.
///
/// Callers beyond `max_connections` wait up to `acquire_timeout_secs` for a
/// free connection before failing with a pool timeout.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(config.connect_options()?)
        .await
}

/// Run a trivial query to confirm the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
