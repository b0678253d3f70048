//! Vireo persistence layer.
//!
//! Models mirror the tables created by `db/migrations`; repositories are
//! zero-sized structs providing async query methods. The two writes that
//! make up a committed transition (the version-guarded submission update
//! and the transition append) take any `PgExecutor` so the review engine
//! can run them inside one transaction.

pub mod models;
pub mod repositories;

/// Shared connection pool alias used across crates.
pub type DbPool = sqlx::PgPool;

/// Default maximum number of pooled connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Connect to PostgreSQL and return a ready pool.
pub async fn connect(database_url: &str) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
