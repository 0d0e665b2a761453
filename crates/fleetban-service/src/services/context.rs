//! Service context - dependency container for services

use std::sync::Arc;

use fleetban_core::traits::{
    AdminRepository, BanDetailRepository, BanRepository, NodeRepository,
};
use fleetban_core::{Snowflake, SnowflakeGenerator};
use fleetban_relay::RelayQueue;

use super::error::{ServiceError, ServiceResult};

/// Everything the services need: repositories, the relay queue and the id
/// generator
///
/// Cheap to clone; every member is shared.
#[derive(Clone)]
pub struct ServiceContext {
    ban_repo: Arc<dyn BanRepository>,
    detail_repo: Arc<dyn BanDetailRepository>,
    node_repo: Arc<dyn NodeRepository>,
    admin_repo: Arc<dyn AdminRepository>,

    relay: RelayQueue,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    pub fn new(
        ban_repo: Arc<dyn BanRepository>,
        detail_repo: Arc<dyn BanDetailRepository>,
        node_repo: Arc<dyn NodeRepository>,
        admin_repo: Arc<dyn AdminRepository>,
        relay: RelayQueue,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            ban_repo,
            detail_repo,
            node_repo,
            admin_repo,
            relay,
            snowflake_generator,
        }
    }

    // === Repositories ===

    pub fn ban_repo(&self) -> &dyn BanRepository {
        self.ban_repo.as_ref()
    }

    pub fn detail_repo(&self) -> &dyn BanDetailRepository {
        self.detail_repo.as_ref()
    }

    pub fn node_repo(&self) -> &dyn NodeRepository {
        self.node_repo.as_ref()
    }

    pub fn admin_repo(&self) -> &dyn AdminRepository {
        self.admin_repo.as_ref()
    }

    // === Relay ===

    pub fn relay(&self) -> &RelayQueue {
        &self.relay
    }

    // === Ids ===

    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("relay", &self.relay)
            .finish()
    }
}

/// Builder for [`ServiceContext`]
#[derive(Default)]
pub struct ServiceContextBuilder {
    ban_repo: Option<Arc<dyn BanRepository>>,
    detail_repo: Option<Arc<dyn BanDetailRepository>>,
    node_repo: Option<Arc<dyn NodeRepository>>,
    admin_repo: Option<Arc<dyn AdminRepository>>,
    relay: Option<RelayQueue>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ban_repo(mut self, repo: Arc<dyn BanRepository>) -> Self {
        self.ban_repo = Some(repo);
        self
    }

    pub fn detail_repo(mut self, repo: Arc<dyn BanDetailRepository>) -> Self {
        self.detail_repo = Some(repo);
        self
    }

    pub fn node_repo(mut self, repo: Arc<dyn NodeRepository>) -> Self {
        self.node_repo = Some(repo);
        self
    }

    pub fn admin_repo(mut self, repo: Arc<dyn AdminRepository>) -> Self {
        self.admin_repo = Some(repo);
        self
    }

    pub fn relay(mut self, queue: RelayQueue) -> Self {
        self.relay = Some(queue);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext::new(
            required(self.ban_repo, "ban_repo")?,
            required(self.detail_repo, "detail_repo")?,
            required(self.node_repo, "node_repo")?,
            required(self.admin_repo, "admin_repo")?,
            required(self.relay, "relay")?,
            required(self.snowflake_generator, "snowflake_generator")?,
        ))
    }
}
