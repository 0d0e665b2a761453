//! Ban detail entity <-> model mapper

use fleetban_core::entities::{BanDetail, Identity};
use fleetban_core::error::DomainError;
use fleetban_core::value_objects::Snowflake;

use crate::models::BanDetailModel;

/// Rows are re-validated; a row that no longer forms an identity is corrupt
impl TryFrom<BanDetailModel> for BanDetail {
    type Error = DomainError;

    fn try_from(model: BanDetailModel) -> Result<Self, Self::Error> {
        let identity = Identity::new(
            model.handle.as_deref(),
            model.hardware_id.as_deref(),
            model.network_address.as_deref(),
        )
        .map_err(|e| DomainError::DatabaseError(format!("ban detail {}: {e}", model.id)))?;

        Ok(BanDetail {
            id: Snowflake::new(model.id),
            ban_id: Snowflake::new(model.ban_id),
            identity,
            removed_by: model.removed_by.map(Snowflake::new),
            removed_at: model.removed_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Identity columns prepared for binding
pub struct DetailColumns<'a> {
    pub handle: Option<&'a str>,
    pub hardware_id: Option<&'a str>,
    pub network_address: Option<String>,
}

impl<'a> DetailColumns<'a> {
    pub fn new(identity: &'a Identity) -> Self {
        Self {
            handle: identity.handle(),
            hardware_id: identity.hardware_id(),
            network_address: identity.network_address_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn model(handle: Option<&str>, ip: Option<&str>) -> BanDetailModel {
        BanDetailModel {
            id: 3,
            ban_id: 1,
            handle: handle.map(String::from),
            hardware_id: None,
            network_address: ip.map(String::from),
            removed_by: None,
            removed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_row() {
        let detail = BanDetail::try_from(model(Some("bob"), Some("10.1.1.1"))).unwrap();
        assert_eq!(detail.identity.handle(), Some("bob"));
        assert_eq!(detail.ban_id, Snowflake::new(1));
    }

    #[test]
    fn test_corrupt_row() {
        let err = BanDetail::try_from(model(None, Some("bogus"))).unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(msg) if msg.starts_with("ban detail 3")));
    }

    #[test]
    fn test_columns() {
        let identity = Identity::new(Some("bob"), None, Some("::ffff:10.0.0.1")).unwrap();
        let cols = DetailColumns::new(&identity);
        assert_eq!(cols.handle, Some("bob"));
        assert!(cols.hardware_id.is_none());
        assert!(cols.network_address.is_some());
    }
}
