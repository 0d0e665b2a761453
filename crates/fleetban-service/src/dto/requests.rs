//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate`. Shape checks live
//! here; domain rules (blank identity, expiry in the past, ...) are enforced by
//! the core types when the service builds entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use validator::Validate;

use fleetban_core::value_objects::DEFAULT_PER_PAGE;
use fleetban_core::{BanTerms, DomainError, Identity, PageRequest, Snowflake};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Identity
// ============================================================================

/// Raw identity fields as submitted; blanks count as absent
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct IdentityInput {
    #[validate(length(max = 255, message = "Handle must be at most 255 characters"))]
    pub handle: Option<String>,

    #[validate(length(max = 255, message = "Hardware id must be at most 255 characters"))]
    pub hardware_id: Option<String>,

    #[validate(length(max = 45, message = "Network address must be at most 45 characters"))]
    pub network_address: Option<String>,
}

impl IdentityInput {
    pub fn to_identity(&self) -> Result<Identity, DomainError> {
        Identity::new(
            self.handle.as_deref(),
            self.hardware_id.as_deref(),
            self.network_address.as_deref(),
        )
    }
}

// ============================================================================
// Ban Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBanRequest {
    /// `None` bans fleet-wide
    #[serde(default)]
    pub target_node_id: Option<Snowflake>,

    #[validate(length(min = 1, max = 2000, message = "Reason must be 1-2000 characters"))]
    pub reason: String,

    /// Raw magnitude, minutes by convention
    #[validate(range(min = 0, message = "Duration must not be negative"))]
    #[serde(default)]
    pub duration: i64,

    /// `None` is permanent
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub requires_appeal: bool,

    #[serde(flatten)]
    #[validate(nested)]
    pub identity: IdentityInput,
}

impl CreateBanRequest {
    pub fn terms(&self) -> BanTerms {
        BanTerms {
            target_node_id: self.target_node_id,
            reason: self.reason.clone(),
            duration: self.duration,
            expires_at: self.expires_at,
            requires_appeal: self.requires_appeal,
        }
    }
}

/// Partial update; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBanRequest {
    /// `null` switches the ban to fleet-wide
    #[serde(default, deserialize_with = "nullable")]
    pub target_node_id: Option<Option<Snowflake>>,

    #[validate(length(min = 1, max = 2000, message = "Reason must be 1-2000 characters"))]
    pub reason: Option<String>,

    #[validate(range(min = 0, message = "Duration must not be negative"))]
    pub duration: Option<i64>,

    /// `null` makes the ban permanent
    #[serde(default, deserialize_with = "nullable")]
    pub expires_at: Option<Option<DateTime<Utc>>>,

    pub requires_appeal: Option<bool>,

    /// Replacement identity for the original detail
    #[validate(nested)]
    pub identity: Option<IdentityInput>,
}

impl UpdateBanRequest {
    /// Current terms with this request's changes applied
    pub fn merge_into(&self, mut terms: BanTerms) -> BanTerms {
        if let Some(target) = self.target_node_id {
            terms.target_node_id = target;
        }
        if let Some(reason) = &self.reason {
            terms.reason.clone_from(reason);
        }
        if let Some(duration) = self.duration {
            terms.duration = duration;
        }
        if let Some(expires_at) = self.expires_at {
            terms.expires_at = expires_at;
        }
        if let Some(requires_appeal) = self.requires_appeal {
            terms.requires_appeal = requires_appeal;
        }
        terms
    }

    /// Whether the request touches the expiry
    pub fn changes_expiry(&self) -> bool {
        self.expires_at.is_some()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddDetailRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub identity: IdentityInput,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkRemoveBansRequest {
    #[validate(length(min = 1, message = "ids must not be empty"))]
    pub ids: Vec<Snowflake>,
}

// ============================================================================
// Listing
// ============================================================================

/// `?page=&per_page=` query
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        PageRequest::new(
            query.page.unwrap_or(1),
            query.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_ban_request_flattens_identity() {
        let request: CreateBanRequest = serde_json::from_value(json!({
            "reason": "cheating",
            "duration": 1440,
            "requires_appeal": true,
            "handle": "bob",
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.identity.handle.as_deref(), Some("bob"));
        assert!(request.target_node_id.is_none());
        assert!(request.expires_at.is_none());
        assert!(request.terms().requires_appeal);
    }

    #[test]
    fn test_create_ban_request_validation() {
        let request: CreateBanRequest = serde_json::from_value(json!({
            "reason": "",
            "duration": -5,
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("reason"));
        assert!(fields.contains_key("duration"));
    }

    #[test]
    fn test_identity_input_blank_fields() {
        let input = IdentityInput {
            handle: Some("  ".to_string()),
            hardware_id: None,
            network_address: Some(String::new()),
        };
        assert!(matches!(input.to_identity(), Err(DomainError::EmptyIdentity)));
    }

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let absent: UpdateBanRequest = serde_json::from_value(json!({})).unwrap();
        assert!(absent.expires_at.is_none());
        assert!(!absent.changes_expiry());

        let cleared: UpdateBanRequest =
            serde_json::from_value(json!({ "expires_at": null, "target_node_id": null }))
                .unwrap();
        assert_eq!(cleared.expires_at, Some(None));
        assert_eq!(cleared.target_node_id, Some(None));

        let current = BanTerms {
            target_node_id: Some(Snowflake::new(4)),
            reason: "old".to_string(),
            duration: 10,
            expires_at: Some(Utc::now()),
            requires_appeal: false,
        };
        let merged = cleared.merge_into(current);
        assert!(merged.target_node_id.is_none());
        assert!(merged.expires_at.is_none());
        assert_eq!(merged.reason, "old");
    }

    #[test]
    fn test_bulk_remove_requires_ids() {
        let empty = BulkRemoveBansRequest { ids: vec![] };
        assert!(empty.validate().is_err());

        let request: BulkRemoveBansRequest =
            serde_json::from_value(json!({ "ids": [1, "2", 99] })).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.ids.len(), 3);

        assert!(serde_json::from_value::<BulkRemoveBansRequest>(json!({})).is_err());
        assert!(serde_json::from_value::<BulkRemoveBansRequest>(json!({ "ids": 5 })).is_err());
    }

    #[test]
    fn test_page_query_defaults() {
        let request = PageRequest::from(PageQuery::default());
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, DEFAULT_PER_PAGE);

        let request = PageRequest::from(PageQuery {
            page: Some(0),
            per_page: Some(1000),
        });
        assert_eq!(request.page, 1);
        assert!(request.per_page <= 100);
    }
}
