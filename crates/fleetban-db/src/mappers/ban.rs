//! Ban entity <-> model mapper

use fleetban_core::entities::{Ban, BanDetail, BanOverview};
use fleetban_core::error::DomainError;
use fleetban_core::value_objects::Snowflake;

use crate::models::{BanDetailModel, BanModel, BanOverviewModel};

/// Convert BanModel to Ban entity
impl From<BanModel> for Ban {
    fn from(model: BanModel) -> Self {
        Ban {
            id: Snowflake::new(model.id),
            issuer_id: Snowflake::new(model.issuer_id),
            target_node_id: model.target_node_id.map(Snowflake::new),
            reason: model.reason,
            duration: model.duration,
            expires_at: model.expires_at,
            requires_appeal: model.requires_appeal,
            removed_by: model.removed_by.map(Snowflake::new),
            removed_at: model.removed_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl TryFrom<BanOverviewModel> for BanOverview {
    type Error = DomainError;

    fn try_from(row: BanOverviewModel) -> Result<Self, Self::Error> {
        let ban_id = row.ban.id;
        // The lateral join yields all-null detail columns when no live detail exists
        let original_detail = match (row.detail_id, row.detail_created_at, row.detail_updated_at) {
            (Some(id), Some(created_at), Some(updated_at)) => Some(BanDetail::try_from(
                BanDetailModel {
                    id,
                    ban_id,
                    handle: row.detail_handle,
                    hardware_id: row.detail_hardware_id,
                    network_address: row.detail_network_address,
                    removed_by: None,
                    removed_at: None,
                    created_at,
                    updated_at,
                },
            )?),
            _ => None,
        };

        Ok(BanOverview {
            ban: row.ban.into(),
            original_detail,
            detail_count: row.detail_count,
            issuer_handle: row.issuer_handle,
            node_name: row.node_name,
        })
    }
}

/// Ban entity prepared for binding
pub struct BanColumns<'a> {
    pub id: i64,
    pub issuer_id: i64,
    pub target_node_id: Option<i64>,
    pub reason: &'a str,
    pub duration: i64,
}

impl<'a> BanColumns<'a> {
    pub fn new(ban: &'a Ban) -> Self {
        Self {
            id: ban.id.into_inner(),
            issuer_id: ban.issuer_id.into_inner(),
            target_node_id: ban.target_node_id.map(Snowflake::into_inner),
            reason: &ban.reason,
            duration: ban.duration,
        }
    }
}
