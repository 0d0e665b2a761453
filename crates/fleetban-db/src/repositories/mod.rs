//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! fleetban-core.

mod admin;
mod ban;
mod detail;
mod error;
mod node;

pub use admin::PgAdminRepository;
pub use ban::PgBanRepository;
pub use detail::PgBanDetailRepository;
pub use node::PgNodeRepository;
