//! PostgreSQL implementation of NodeRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use fleetban_core::entities::Node;
use fleetban_core::traits::{NodeRepository, RepoResult};
use fleetban_core::value_objects::Snowflake;

use crate::models::NodeModel;

use super::error::map_db_error;

/// PostgreSQL implementation of NodeRepository
#[derive(Clone)]
pub struct PgNodeRepository {
    pool: PgPool,
}

impl PgNodeRepository {
    /// Create a new PgNodeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NodeRepository for PgNodeRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Node>> {
        let result = sqlx::query_as::<_, NodeModel>(
            "SELECT id, name, active, invisible FROM nodes WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Node::from))
    }

    #[instrument(skip(self))]
    async fn list_active(&self) -> RepoResult<Vec<Node>> {
        let results = sqlx::query_as::<_, NodeModel>(
            r"
            SELECT id, name, active, invisible
            FROM nodes
            WHERE active AND NOT invisible
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Node::from).collect())
    }
}
