//! Domain entities

mod ban;
mod detail;
mod node;
mod overview;

pub use ban::{Ban, BanState, BanTerms, MAX_REASON_LENGTH};
pub use detail::{BanDetail, Identity};
pub use node::{GameAdmin, Node};
pub use overview::{BanFilter, BanOverview, BanView};
