//! PostgreSQL implementation of BanDetailRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use fleetban_core::entities::BanDetail;
use fleetban_core::traits::{BanDetailRepository, RepoResult};
use fleetban_core::value_objects::Snowflake;

use crate::mappers::DetailColumns;
use crate::models::BanDetailModel;

use super::error::{ban_not_found, detail_not_found, map_db_error, map_fk_violation};

/// PostgreSQL implementation of BanDetailRepository
#[derive(Clone)]
pub struct PgBanDetailRepository {
    pool: PgPool,
}

impl PgBanDetailRepository {
    /// Create a new PgBanDetailRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BanDetailRepository for PgBanDetailRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<BanDetail>> {
        let result = sqlx::query_as::<_, BanDetailModel>(
            r"
            SELECT id, ban_id, handle, hardware_id, network_address,
                   removed_by, removed_at, created_at, updated_at
            FROM ban_details
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(BanDetail::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_original(&self, ban_id: Snowflake) -> RepoResult<Option<BanDetail>> {
        let result = sqlx::query_as::<_, BanDetailModel>(
            r"
            SELECT id, ban_id, handle, hardware_id, network_address,
                   removed_by, removed_at, created_at, updated_at
            FROM ban_details
            WHERE ban_id = $1 AND removed_at IS NULL
            ORDER BY created_at, id
            LIMIT 1
            ",
        )
        .bind(ban_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(BanDetail::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_ban(
        &self,
        ban_id: Snowflake,
        include_removed: bool,
    ) -> RepoResult<Vec<BanDetail>> {
        let results = sqlx::query_as::<_, BanDetailModel>(
            r"
            SELECT id, ban_id, handle, hardware_id, network_address,
                   removed_by, removed_at, created_at, updated_at
            FROM ban_details
            WHERE ban_id = $1 AND ($2 OR removed_at IS NULL)
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(ban_id.into_inner())
        .bind(include_removed)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(BanDetail::try_from).collect()
    }

    #[instrument(skip(self, detail), fields(detail_id = %detail.id, ban_id = %detail.ban_id))]
    async fn create(&self, detail: &BanDetail) -> RepoResult<()> {
        let identity = DetailColumns::new(&detail.identity);

        sqlx::query(
            r"
            INSERT INTO ban_details (id, ban_id, handle, hardware_id, network_address,
                                     created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ",
        )
        .bind(detail.id.into_inner())
        .bind(detail.ban_id.into_inner())
        .bind(identity.handle)
        .bind(identity.hardware_id)
        .bind(identity.network_address)
        .bind(detail.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, || ban_not_found(detail.ban_id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn soft_delete(
        &self,
        id: Snowflake,
        removed_by: Snowflake,
        removed_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        // Single round trip: the CTE reports whether the row exists at all
        let (exists, updated) = sqlx::query_as::<_, (bool, bool)>(
            r"
            WITH updated AS (
                UPDATE ban_details
                SET removed_by = $2, removed_at = $3, updated_at = $3
                WHERE id = $1 AND removed_at IS NULL
                RETURNING id
            )
            SELECT EXISTS(SELECT 1 FROM ban_details WHERE id = $1),
                   EXISTS(SELECT 1 FROM updated)
            ",
        )
        .bind(id.into_inner())
        .bind(removed_by.into_inner())
        .bind(removed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        if !exists {
            return Err(detail_not_found(id));
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgBanDetailRepository>();
    }
}
