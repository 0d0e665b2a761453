//! Ban detail database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for ban_details table
#[derive(Debug, Clone, FromRow)]
pub struct BanDetailModel {
    pub id: i64,
    pub ban_id: i64,
    pub handle: Option<String>,
    pub hardware_id: Option<String>,
    pub network_address: Option<String>,
    pub removed_by: Option<i64>,
    pub removed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
