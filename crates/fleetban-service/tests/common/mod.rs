//! In-memory repositories and a context builder for lifecycle tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use fleetban_core::traits::{
    AdminRepository, BanDetailRepository, BanRepository, NodeRepository, RepoResult,
};
use fleetban_core::{
    Ban, BanCreatedNotice, BanDetail, BanFilter, BanOverview, DomainError, GameAdmin, Node, Page,
    PageRequest, Snowflake, SnowflakeGenerator,
};
use fleetban_relay::RelayQueue;
use fleetban_service::{ServiceContext, ServiceContextBuilder};

pub const ADMIN_A: Snowflake = Snowflake::new(1);
pub const ADMIN_B: Snowflake = Snowflake::new(2);

/// One store behind all four repository traits
#[derive(Default)]
pub struct MemoryStore {
    pub bans: Mutex<HashMap<Snowflake, Ban>>,
    pub details: Mutex<Vec<BanDetail>>,
    pub nodes: Mutex<Vec<Node>>,
    pub admins: Mutex<Vec<GameAdmin>>,
    /// Artificial latency on admin lookups
    pub admin_lookup_delay: Mutex<Option<Duration>>,
}

impl MemoryStore {
    pub fn seeded() -> Arc<Self> {
        let store = Self::default();
        store.admins.lock().extend([
            GameAdmin {
                id: ADMIN_A,
                handle: "alice".to_string(),
            },
            GameAdmin {
                id: ADMIN_B,
                handle: "bruno".to_string(),
            },
        ]);
        store.nodes.lock().extend([
            node(10, "eu-1", true, false),
            node(11, "us-1", true, false),
            node(12, "staging", true, true),
            node(13, "retired", false, false),
        ]);
        Arc::new(store)
    }

    pub fn ban(&self, id: Snowflake) -> Ban {
        self.bans.lock().get(&id).cloned().expect("ban stored")
    }

    pub fn details_of(&self, ban_id: Snowflake) -> Vec<BanDetail> {
        self.details
            .lock()
            .iter()
            .filter(|d| d.ban_id == ban_id)
            .cloned()
            .collect()
    }

    fn original_of(details: &[BanDetail], ban_id: Snowflake) -> Option<BanDetail> {
        details
            .iter()
            .filter(|d| d.ban_id == ban_id && !d.is_removed())
            .min_by_key(|d| (d.created_at, d.id))
            .cloned()
    }
}

pub fn node(id: i64, name: &str, active: bool, invisible: bool) -> Node {
    Node {
        id: Snowflake::new(id),
        name: name.to_string(),
        active,
        invisible,
    }
}

#[async_trait]
impl BanRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Ban>> {
        Ok(self.bans.lock().get(&id).cloned())
    }

    async fn find_page(
        &self,
        filter: BanFilter,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> RepoResult<Page<BanOverview>> {
        let want_live = matches!(filter, BanFilter::Active);
        let mut bans: Vec<Ban> = self
            .bans
            .lock()
            .values()
            .filter(|b| b.is_active_at(now) == want_live)
            .cloned()
            .collect();
        bans.sort_by_key(|b| std::cmp::Reverse((b.created_at, b.id)));

        let total = bans.len() as i64;
        let details = self.details.lock();
        let admins = self.admins.lock();
        let nodes = self.nodes.lock();

        let items = bans
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .map(|ban| BanOverview {
                original_detail: Self::original_of(&details, ban.id),
                detail_count: details
                    .iter()
                    .filter(|d| d.ban_id == ban.id && !d.is_removed())
                    .count() as i64,
                issuer_handle: admins
                    .iter()
                    .find(|a| a.id == ban.issuer_id)
                    .map(|a| a.handle.clone()),
                node_name: ban
                    .target_node_id
                    .and_then(|id| nodes.iter().find(|n| n.id == id))
                    .map(|n| n.name.clone()),
                ban,
            })
            .collect();

        Ok(Page::new(items, total, page))
    }

    async fn create_with_detail(&self, ban: &Ban, detail: &BanDetail) -> RepoResult<()> {
        if let Some(node_id) = ban.target_node_id {
            if !self.nodes.lock().iter().any(|n| n.id == node_id) {
                return Err(DomainError::NodeNotFound(node_id));
            }
        }
        if !self.admins.lock().iter().any(|a| a.id == ban.issuer_id) {
            return Err(DomainError::AdminNotFound(ban.issuer_id));
        }

        self.bans.lock().insert(ban.id, ban.clone());
        self.details.lock().push(detail.clone());
        Ok(())
    }

    async fn update(&self, ban: &Ban, original_detail: Option<&BanDetail>) -> RepoResult<()> {
        let mut bans = self.bans.lock();
        let stored = bans
            .get_mut(&ban.id)
            .filter(|b| !b.is_removed())
            .ok_or(DomainError::BanNotFound(ban.id))?;

        if let Some(detail) = original_detail {
            let mut details = self.details.lock();
            let row = details
                .iter_mut()
                .find(|d| d.id == detail.id && d.ban_id == ban.id && !d.is_removed())
                .ok_or(DomainError::BanDetailNotFound(detail.id))?;
            row.identity = detail.identity.clone();
            row.updated_at = detail.updated_at;
        }

        stored.target_node_id = ban.target_node_id;
        stored.reason.clone_from(&ban.reason);
        stored.duration = ban.duration;
        stored.expires_at = ban.expires_at;
        stored.requires_appeal = ban.requires_appeal;
        stored.updated_at = ban.updated_at;
        Ok(())
    }

    async fn soft_delete(
        &self,
        id: Snowflake,
        removed_by: Snowflake,
        removed_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let mut bans = self.bans.lock();
        let ban = bans.get_mut(&id).ok_or(DomainError::BanNotFound(id))?;
        if ban.is_removed() {
            return Ok(false);
        }
        ban.removed_by = Some(removed_by);
        ban.removed_at = Some(removed_at);
        Ok(true)
    }

    async fn soft_delete_many(
        &self,
        ids: &[Snowflake],
        removed_by: Snowflake,
        removed_at: DateTime<Utc>,
    ) -> RepoResult<u64> {
        let mut bans = self.bans.lock();
        let mut removed = 0;
        for id in ids {
            if let Some(ban) = bans.get_mut(id).filter(|b| !b.is_removed()) {
                ban.removed_by = Some(removed_by);
                ban.removed_at = Some(removed_at);
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl BanDetailRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<BanDetail>> {
        Ok(self.details.lock().iter().find(|d| d.id == id).cloned())
    }

    async fn find_original(&self, ban_id: Snowflake) -> RepoResult<Option<BanDetail>> {
        Ok(Self::original_of(&self.details.lock(), ban_id))
    }

    async fn find_by_ban(
        &self,
        ban_id: Snowflake,
        include_removed: bool,
    ) -> RepoResult<Vec<BanDetail>> {
        let mut details: Vec<BanDetail> = self
            .details
            .lock()
            .iter()
            .filter(|d| d.ban_id == ban_id && (include_removed || !d.is_removed()))
            .cloned()
            .collect();
        details.sort_by_key(|d| std::cmp::Reverse((d.created_at, d.id)));
        Ok(details)
    }

    async fn create(&self, detail: &BanDetail) -> RepoResult<()> {
        if !self.bans.lock().contains_key(&detail.ban_id) {
            return Err(DomainError::BanNotFound(detail.ban_id));
        }
        self.details.lock().push(detail.clone());
        Ok(())
    }

    async fn soft_delete(
        &self,
        id: Snowflake,
        removed_by: Snowflake,
        removed_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let mut details = self.details.lock();
        let detail = details
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(DomainError::BanDetailNotFound(id))?;
        if detail.is_removed() {
            return Ok(false);
        }
        detail.removed_by = Some(removed_by);
        detail.removed_at = Some(removed_at);
        Ok(true)
    }
}

#[async_trait]
impl NodeRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Node>> {
        Ok(self.nodes.lock().iter().find(|n| n.id == id).cloned())
    }

    async fn list_active(&self) -> RepoResult<Vec<Node>> {
        Ok(self
            .nodes
            .lock()
            .iter()
            .filter(|n| n.receives_broadcasts())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AdminRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<GameAdmin>> {
        let delay = *self.admin_lookup_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.admins.lock().iter().find(|a| a.id == id).cloned())
    }
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub ctx: ServiceContext,
    pub notices: mpsc::Receiver<BanCreatedNotice>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_queue(RelayQueue::bounded(16))
    }

    pub fn with_queue((queue, notices): (RelayQueue, mpsc::Receiver<BanCreatedNotice>)) -> Self {
        let store = MemoryStore::seeded();
        let ctx = ServiceContextBuilder::new()
            .ban_repo(store.clone())
            .detail_repo(store.clone())
            .node_repo(store.clone())
            .admin_repo(store.clone())
            .relay(queue)
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build()
            .expect("complete context");

        Self {
            store,
            ctx,
            notices,
        }
    }
}

/// Notices queued so far
pub fn drain(notices: &mut mpsc::Receiver<BanCreatedNotice>) -> Vec<BanCreatedNotice> {
    let mut out = Vec::new();
    while let Ok(notice) = notices.try_recv() {
        out.push(notice);
    }
    out
}
