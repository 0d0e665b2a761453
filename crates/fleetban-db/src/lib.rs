//! # fleetban-db
//!
//! Database layer implementing the `fleetban-core` repository traits with
//! PostgreSQL via SQLx.
//!
//! - Connection pool management and embedded migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use fleetban_db::{create_pool, run_migrations, PgBanRepository, PgPoolConfig};
//!
//! let pool = create_pool(&PgPoolConfig::from(&config.database)).await?;
//! run_migrations(&pool).await?;
//! let bans = PgBanRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PgPoolConfig};
pub use repositories::{
    PgAdminRepository, PgBanDetailRepository, PgBanRepository, PgNodeRepository,
};
