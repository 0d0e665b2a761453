//! Ban service
//!
//! The ban lifecycle: create, update, remove (single and bulk), identity
//! details, and the listings. Creating a ban hands a notice to the relay queue
//! once the write has committed; nothing else here touches the relay.

use chrono::Utc;
use tracing::{info, instrument, warn};

use fleetban_core::{
    Ban, BanCreatedNotice, BanDetail, BanFilter, BanTerms, BanView, DomainError, PageRequest,
    Snowflake,
};

use crate::dto::{
    AddDetailRequest, BanOverviewResponse, BanViewResponse, BanWithDetailResponse,
    BulkRemoveResponse, CreateBanRequest, DetailResponse, PageResponse, UpdateBanRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Ban service
pub struct BanService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BanService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a ban with its original identity and queue the relay notice
    ///
    /// The relay outcome is never observed here.
    #[instrument(skip(self, request), fields(issuer_id = %issuer_id))]
    pub async fn create_ban(
        &self,
        issuer_id: Snowflake,
        request: CreateBanRequest,
    ) -> ServiceResult<BanWithDetailResponse> {
        let now = Utc::now();
        let identity = request.identity.to_identity()?;
        let mut terms = request.terms();
        terms.validate(now)?;

        if let Some(node_id) = terms.target_node_id {
            self.require_node(node_id).await?;
        }

        let issuer = self
            .ctx
            .admin_repo()
            .find_by_id(issuer_id)
            .await?
            .ok_or(DomainError::AdminNotFound(issuer_id))?;

        let ban = Ban::new(self.ctx.generate_id(), issuer_id, terms, now);
        let detail = BanDetail::new(self.ctx.generate_id(), ban.id, identity.clone());

        self.ctx.ban_repo().create_with_detail(&ban, &detail).await?;

        info!(
            ban_id = %ban.id,
            target_node_id = ?ban.target_node_id,
            duration = %ban.duration_human(),
            "Ban created"
        );

        let notice = BanCreatedNotice::new(&ban, identity, issuer.handle);
        if !self.ctx.relay().enqueue(notice) {
            warn!(ban_id = %ban.id, "Ban stored but not relayed");
        }

        Ok(BanWithDetailResponse {
            ban: ban.into(),
            original_detail: Some(detail.into()),
        })
    }

    /// Change the terms of a live ban and optionally its original identity
    ///
    /// Never re-notifies the relay.
    #[instrument(skip(self, request))]
    pub async fn update_ban(
        &self,
        ban_id: Snowflake,
        request: UpdateBanRequest,
    ) -> ServiceResult<BanWithDetailResponse> {
        let mut ban = self.find_live_ban(ban_id).await?;

        let identity = request
            .identity
            .as_ref()
            .map(|input| input.to_identity())
            .transpose()?;

        let mut terms = request.merge_into(current_terms(&ban));
        if request.changes_expiry() {
            terms.validate(Utc::now())?;
        } else {
            // An untouched expiry may already lie in the past
            terms.validate_fields()?;
        }

        if let Some(node_id) = terms.target_node_id {
            if ban.target_node_id != Some(node_id) {
                self.require_node(node_id).await?;
            }
        }

        let mut original = self.ctx.detail_repo().find_original(ban_id).await?;
        let changed_detail = match (identity, original.as_mut()) {
            (Some(identity), Some(detail)) => {
                detail.set_identity(identity);
                Some(&*detail)
            }
            (Some(_), None) => {
                return Err(ServiceError::validation(
                    "ban has no remaining detail to update",
                ))
            }
            (None, _) => None,
        };

        ban.apply_terms(terms);
        self.ctx.ban_repo().update(&ban, changed_detail).await?;

        info!(ban_id = %ban.id, identity_changed = changed_detail.is_some(), "Ban updated");

        Ok(BanWithDetailResponse {
            ban: ban.into(),
            original_detail: original.map(DetailResponse::from),
        })
    }

    /// Soft-delete a ban; `Ok(false)` when it was already removed
    #[instrument(skip(self))]
    pub async fn remove_ban(&self, ban_id: Snowflake, issuer_id: Snowflake) -> ServiceResult<bool> {
        let removed = self
            .ctx
            .ban_repo()
            .soft_delete(ban_id, issuer_id, Utc::now())
            .await?;

        if removed {
            info!(ban_id = %ban_id, removed_by = %issuer_id, "Ban removed");
        }
        Ok(removed)
    }

    /// Soft-delete many bans at once; unknown and removed ids are skipped
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn remove_bans_bulk(
        &self,
        ids: &[Snowflake],
        issuer_id: Snowflake,
    ) -> ServiceResult<BulkRemoveResponse> {
        if ids.is_empty() {
            return Err(ServiceError::validation("ids must not be empty"));
        }

        let removed = self
            .ctx
            .ban_repo()
            .soft_delete_many(ids, issuer_id, Utc::now())
            .await?;

        info!(removed, removed_by = %issuer_id, "Bans removed in bulk");
        Ok(BulkRemoveResponse { removed })
    }

    /// Append an identity to a live ban
    #[instrument(skip(self, request))]
    pub async fn add_detail(
        &self,
        ban_id: Snowflake,
        request: AddDetailRequest,
    ) -> ServiceResult<DetailResponse> {
        let identity = request.identity.to_identity()?;
        let ban = self.find_live_ban(ban_id).await?;

        let detail = BanDetail::new(self.ctx.generate_id(), ban.id, identity);
        self.ctx.detail_repo().create(&detail).await?;

        info!(ban_id = %ban.id, detail_id = %detail.id, "Ban detail added");
        Ok(detail.into())
    }

    /// Soft-delete one detail; the owning ban is untouched
    #[instrument(skip(self))]
    pub async fn remove_detail(
        &self,
        detail_id: Snowflake,
        issuer_id: Snowflake,
    ) -> ServiceResult<bool> {
        let removed = self
            .ctx
            .detail_repo()
            .soft_delete(detail_id, issuer_id, Utc::now())
            .await?;

        if removed {
            info!(detail_id = %detail_id, removed_by = %issuer_id, "Ban detail removed");
        }
        Ok(removed)
    }

    /// Bans currently in force, newest first
    #[instrument(skip(self))]
    pub async fn list_active(
        &self,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<BanOverviewResponse>> {
        self.list(BanFilter::Active, page).await
    }

    /// Removed or expired bans, newest first
    #[instrument(skip(self))]
    pub async fn list_inactive(
        &self,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<BanOverviewResponse>> {
        self.list(BanFilter::Inactive, page).await
    }

    /// One ban, removed ones included, with its live details
    #[instrument(skip(self))]
    pub async fn show_ban(&self, ban_id: Snowflake) -> ServiceResult<BanViewResponse> {
        let ban = self
            .ctx
            .ban_repo()
            .find_by_id(ban_id)
            .await?
            .ok_or(DomainError::BanNotFound(ban_id))?;

        let admins = self.ctx.admin_repo();
        let issuer = admins.find_by_id(ban.issuer_id).await?;
        let remover = match ban.removed_by {
            Some(id) => admins.find_by_id(id).await?,
            None => None,
        };
        let node = match ban.target_node_id {
            Some(id) => self.ctx.node_repo().find_by_id(id).await?,
            None => None,
        };
        let details = self.ctx.detail_repo().find_by_ban(ban_id, false).await?;

        Ok(BanView {
            ban,
            issuer,
            remover,
            node,
            details,
        }
        .into())
    }

    /// Every detail of a ban, removed ones included, newest first
    #[instrument(skip(self))]
    pub async fn list_details(&self, ban_id: Snowflake) -> ServiceResult<Vec<DetailResponse>> {
        if self.ctx.ban_repo().find_by_id(ban_id).await?.is_none() {
            return Err(DomainError::BanNotFound(ban_id).into());
        }

        let details = self.ctx.detail_repo().find_by_ban(ban_id, true).await?;
        Ok(details.into_iter().map(DetailResponse::from).collect())
    }

    // === Helpers ===

    async fn list(
        &self,
        filter: BanFilter,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<BanOverviewResponse>> {
        let page = self
            .ctx
            .ban_repo()
            .find_page(filter, Utc::now(), page)
            .await?;
        Ok(page.into())
    }

    /// Removed bans are reported as missing
    async fn find_live_ban(&self, ban_id: Snowflake) -> ServiceResult<Ban> {
        self.ctx
            .ban_repo()
            .find_by_id(ban_id)
            .await?
            .filter(|ban| !ban.is_removed())
            .ok_or_else(|| DomainError::BanNotFound(ban_id).into())
    }

    async fn require_node(&self, node_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .node_repo()
            .find_by_id(node_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::NodeNotFound(node_id).into())
    }
}

fn current_terms(ban: &Ban) -> BanTerms {
    BanTerms {
        target_node_id: ban.target_node_id,
        reason: ban.reason.clone(),
        duration: ban.duration,
        expires_at: ban.expires_at,
        requires_appeal: ban.requires_appeal,
    }
}
