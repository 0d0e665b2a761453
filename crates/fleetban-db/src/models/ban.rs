//! Ban database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for bans table
#[derive(Debug, Clone, FromRow)]
pub struct BanModel {
    pub id: i64,
    pub issuer_id: i64,
    pub target_node_id: Option<i64>,
    pub reason: String,
    pub duration: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub requires_appeal: bool,
    pub removed_by: Option<i64>,
    pub removed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One listing row: a ban joined with its issuer, node, original detail and
/// live detail count
#[derive(Debug, Clone, FromRow)]
pub struct BanOverviewModel {
    #[sqlx(flatten)]
    pub ban: BanModel,
    pub issuer_handle: Option<String>,
    pub node_name: Option<String>,
    pub detail_count: i64,
    pub detail_id: Option<i64>,
    pub detail_handle: Option<String>,
    pub detail_hardware_id: Option<String>,
    pub detail_network_address: Option<String>,
    pub detail_created_at: Option<DateTime<Utc>>,
    pub detail_updated_at: Option<DateTime<Utc>>,
}
