//! Read models assembled for listings and inspection

use super::{Ban, BanDetail, GameAdmin, Node};

/// Which bans a listing returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanFilter {
    /// Not removed and not expired
    Active,
    /// Removed or expired
    Inactive,
}

/// One row of a ban listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanOverview {
    pub ban: Ban,
    /// `None` only if every detail of the ban was removed
    pub original_detail: Option<BanDetail>,
    /// Non-removed details
    pub detail_count: i64,
    pub issuer_handle: Option<String>,
    pub node_name: Option<String>,
}

/// A single ban with everything it references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanView {
    pub ban: Ban,
    pub issuer: Option<GameAdmin>,
    pub remover: Option<GameAdmin>,
    pub node: Option<Node>,
    /// Non-removed details, newest first
    pub details: Vec<BanDetail>,
}
