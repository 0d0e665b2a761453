//! Response DTOs for API endpoints
//!
//! Snowflake ids serialize as strings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fleetban_core::{BanState, Snowflake};

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Page-numbered listing
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub last_page: u32,
}

// ============================================================================
// Ban Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BanResponse {
    pub id: Snowflake,
    pub issuer_id: Snowflake,
    pub target_node_id: Option<Snowflake>,
    pub reason: String,
    pub duration: i64,
    /// `"permanent"` or e.g. `"2 weeks 3 days"`
    pub duration_human: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub requires_appeal: bool,
    pub state: BanState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_by: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailResponse {
    pub id: Snowflake,
    pub ban_id: Snowflake,
    pub handle: Option<String>,
    pub hardware_id: Option<String>,
    pub network_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_by: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ban as returned by create and update
#[derive(Debug, Clone, Serialize)]
pub struct BanWithDetailResponse {
    #[serde(flatten)]
    pub ban: BanResponse,
    pub original_detail: Option<DetailResponse>,
}

/// One row of a ban listing
#[derive(Debug, Clone, Serialize)]
pub struct BanOverviewResponse {
    #[serde(flatten)]
    pub ban: BanResponse,
    pub original_detail: Option<DetailResponse>,
    pub detail_count: i64,
    pub issuer_handle: Option<String>,
    pub node_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminResponse {
    pub id: Snowflake,
    pub handle: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeResponse {
    pub id: Snowflake,
    pub name: String,
}

/// Single ban page
#[derive(Debug, Clone, Serialize)]
pub struct BanViewResponse {
    #[serde(flatten)]
    pub ban: BanResponse,
    pub issuer: Option<AdminResponse>,
    pub remover: Option<AdminResponse>,
    pub node: Option<NodeResponse>,
    pub details: Vec<DetailResponse>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BulkRemoveResponse {
    /// Bans newly removed by this request
    pub removed: u64,
}

// ============================================================================
// Health Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let label = |ok: bool| if ok { "healthy" } else { "unhealthy" }.to_string();
        Self {
            status: if database_healthy && redis_healthy {
                "ready"
            } else {
                "not_ready"
            }
            .to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: label(database_healthy),
                redis: label(redis_healthy),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness() {
        assert!(ReadinessResponse::ready(true, true).is_ready());

        let degraded = ReadinessResponse::ready(true, false);
        assert!(!degraded.is_ready());
        assert_eq!(degraded.checks.database, "healthy");
        assert_eq!(degraded.checks.redis, "unhealthy");
    }

    #[test]
    fn test_bulk_remove_serialization() {
        let json = serde_json::to_value(BulkRemoveResponse { removed: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({ "removed": 2 }));
    }
}
