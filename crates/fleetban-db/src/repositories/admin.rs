//! PostgreSQL implementation of AdminRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use fleetban_core::entities::GameAdmin;
use fleetban_core::traits::{AdminRepository, RepoResult};
use fleetban_core::value_objects::Snowflake;

use crate::models::GameAdminModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AdminRepository
#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    /// Create a new PgAdminRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<GameAdmin>> {
        let result = sqlx::query_as::<_, GameAdminModel>(
            "SELECT id, handle FROM game_admins WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(GameAdmin::from))
    }
}
