//! Entity to DTO mappers

use chrono::Utc;

use fleetban_core::{Ban, BanDetail, BanOverview, BanView, GameAdmin, Node, Page};

use super::responses::{
    AdminResponse, BanOverviewResponse, BanResponse, BanViewResponse, DetailResponse, NodeResponse,
    PageMeta, PageResponse,
};

// ============================================================================
// Ban Mappers
// ============================================================================

impl From<&Ban> for BanResponse {
    fn from(ban: &Ban) -> Self {
        Self {
            id: ban.id,
            issuer_id: ban.issuer_id,
            target_node_id: ban.target_node_id,
            reason: ban.reason.clone(),
            duration: ban.duration,
            duration_human: ban.duration_human(),
            expires_at: ban.expires_at,
            requires_appeal: ban.requires_appeal,
            state: ban.state_at(Utc::now()),
            removed_by: ban.removed_by,
            removed_at: ban.removed_at,
            created_at: ban.created_at,
            updated_at: ban.updated_at,
        }
    }
}

impl From<Ban> for BanResponse {
    fn from(ban: Ban) -> Self {
        Self::from(&ban)
    }
}

impl From<&BanDetail> for DetailResponse {
    fn from(detail: &BanDetail) -> Self {
        Self {
            id: detail.id,
            ban_id: detail.ban_id,
            handle: detail.identity.handle().map(ToString::to_string),
            hardware_id: detail.identity.hardware_id().map(ToString::to_string),
            network_address: detail.identity.network_address_string(),
            removed_by: detail.removed_by,
            removed_at: detail.removed_at,
            created_at: detail.created_at,
            updated_at: detail.updated_at,
        }
    }
}

impl From<BanDetail> for DetailResponse {
    fn from(detail: BanDetail) -> Self {
        Self::from(&detail)
    }
}

impl From<BanOverview> for BanOverviewResponse {
    fn from(overview: BanOverview) -> Self {
        Self {
            ban: BanResponse::from(&overview.ban),
            original_detail: overview.original_detail.map(DetailResponse::from),
            detail_count: overview.detail_count,
            issuer_handle: overview.issuer_handle,
            node_name: overview.node_name,
        }
    }
}

// ============================================================================
// Lookup Mappers
// ============================================================================

impl From<GameAdmin> for AdminResponse {
    fn from(admin: GameAdmin) -> Self {
        Self {
            id: admin.id,
            handle: admin.handle,
        }
    }
}

impl From<Node> for NodeResponse {
    fn from(node: Node) -> Self {
        Self {
            id: node.id,
            name: node.name,
        }
    }
}

impl From<BanView> for BanViewResponse {
    fn from(view: BanView) -> Self {
        Self {
            ban: BanResponse::from(&view.ban),
            issuer: view.issuer.map(AdminResponse::from),
            remover: view.remover.map(AdminResponse::from),
            node: view.node.map(NodeResponse::from),
            details: view.details.into_iter().map(DetailResponse::from).collect(),
        }
    }
}

// ============================================================================
// Paging
// ============================================================================

impl<T, U: From<T>> From<Page<T>> for PageResponse<U> {
    fn from(page: Page<T>) -> Self {
        let pagination = PageMeta {
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            last_page: page.last_page(),
        };
        Self {
            data: page.items.into_iter().map(U::from).collect(),
            pagination,
        }
    }
}
