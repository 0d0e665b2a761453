//! Repository traits (ports) - define the interface for data access
//!
//! Every read path filters on `removed_at` explicitly; nothing here deletes
//! rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Ban, BanDetail, BanFilter, BanOverview, GameAdmin, Node};
use crate::error::DomainError;
use crate::value_objects::{Page, PageRequest, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Ban Repository
// ============================================================================

#[async_trait]
pub trait BanRepository: Send + Sync {
    /// Find ban by ID, removed ones included
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Ban>>;

    /// One page of bans matching `filter` at `now`, newest first
    async fn find_page(
        &self,
        filter: BanFilter,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> RepoResult<Page<BanOverview>>;

    /// Insert a ban together with its original detail in one transaction
    async fn create_with_detail(&self, ban: &Ban, detail: &BanDetail) -> RepoResult<()>;

    /// Persist new terms, and optionally a changed original detail, atomically
    ///
    /// Removed bans are not updated and yield `BanNotFound`.
    async fn update(&self, ban: &Ban, original_detail: Option<&BanDetail>) -> RepoResult<()>;

    /// Mark a ban removed
    ///
    /// Returns `false` when the ban was already removed; its audit fields are
    /// left untouched in that case. Unknown ids yield `BanNotFound`.
    async fn soft_delete(
        &self,
        id: Snowflake,
        removed_by: Snowflake,
        removed_at: DateTime<Utc>,
    ) -> RepoResult<bool>;

    /// Mark every listed, not yet removed ban removed; returns how many were
    async fn soft_delete_many(
        &self,
        ids: &[Snowflake],
        removed_by: Snowflake,
        removed_at: DateTime<Utc>,
    ) -> RepoResult<u64>;
}

// ============================================================================
// Ban Detail Repository
// ============================================================================

#[async_trait]
pub trait BanDetailRepository: Send + Sync {
    /// Find detail by ID, removed ones included
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<BanDetail>>;

    /// Earliest non-removed detail of a ban
    async fn find_original(&self, ban_id: Snowflake) -> RepoResult<Option<BanDetail>>;

    /// Details of a ban, newest first
    async fn find_by_ban(
        &self,
        ban_id: Snowflake,
        include_removed: bool,
    ) -> RepoResult<Vec<BanDetail>>;

    /// Append a detail to an existing ban
    async fn create(&self, detail: &BanDetail) -> RepoResult<()>;

    /// Mark a detail removed; `false` when it already was, `BanDetailNotFound`
    /// for unknown ids
    async fn soft_delete(
        &self,
        id: Snowflake,
        removed_by: Snowflake,
        removed_at: DateTime<Utc>,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Node Repository
// ============================================================================

#[async_trait]
pub trait NodeRepository: Send + Sync {
    /// Find node by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Node>>;

    /// Nodes that are active and not invisible
    async fn list_active(&self) -> RepoResult<Vec<Node>>;
}

// ============================================================================
// Admin Repository
// ============================================================================

#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Find game admin by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<GameAdmin>>;
}
