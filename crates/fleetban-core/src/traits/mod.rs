//! Ports implemented by the infrastructure crates

mod channels;
mod repositories;

pub use channels::{BotChannel, FleetRelay};
pub use repositories::{
    AdminRepository, BanDetailRepository, BanRepository, NodeRepository, RepoResult,
};
