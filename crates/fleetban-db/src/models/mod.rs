//! Database models - SQLx-compatible structs for PostgreSQL tables

mod ban;
mod detail;
mod lookup;

pub use ban::{BanModel, BanOverviewModel};
pub use detail::BanDetailModel;
pub use lookup::{GameAdminModel, NodeModel};
