//! # dragonkeep-db
//!
//! Storage for the revenue ledger.
//!
//! - [`PgRevenueRepository`]: PostgreSQL via SQLx, used when `DATABASE_URL` is set
//! - [`InMemoryRevenueRepository`]: process-local ledger, lost on restart
//!
//! ```rust,ignore
//! let pool = dragonkeep_db::create_pool(&config.database.unwrap()).await?;
//! dragonkeep_db::run_migrations(&pool).await?;
//! let revenues = PgRevenueRepository::new(pool);
//! ```

pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{InMemoryRevenueRepository, PgRevenueRepository};
