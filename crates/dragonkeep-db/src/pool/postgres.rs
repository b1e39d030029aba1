//! PostgreSQL connection pool management

use std::time::Duration;

use dragonkeep_common::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);
const IDLE_TIMEOUT: Duration = Duration::from_secs(300);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Schema files applied in order at startup; each must be safe to re-run
const SCHEMA: &[(&str, &str)] = &[(
    "0001_create_revenues",
    include_str!("../../migrations/0001_create_revenues.sql"),
)];

/// Create a new PostgreSQL connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .connect(&config.url)
        .await
}

/// Apply the embedded schema
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    for &(name, sql) in SCHEMA {
        sqlx::raw_sql(sql).execute(pool).await?;
        debug!(migration = name, "Schema applied");
    }
    Ok(())
}
