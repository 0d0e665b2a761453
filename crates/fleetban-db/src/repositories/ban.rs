//! PostgreSQL implementation of BanRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use fleetban_core::entities::{Ban, BanDetail, BanFilter, BanOverview};
use fleetban_core::error::DomainError;
use fleetban_core::traits::{BanRepository, RepoResult};
use fleetban_core::value_objects::{Page, PageRequest, Snowflake};

use crate::mappers::{BanColumns, DetailColumns};
use crate::models::{BanModel, BanOverviewModel};

use super::error::{ban_not_found, detail_not_found, map_db_error, map_fk_violation, snowflake_ids};

/// `true` for bans that still apply at `$1`
const LIVE_PREDICATE: &str =
    "(b.removed_at IS NULL AND (b.expires_at IS NULL OR b.expires_at > $1))";

/// PostgreSQL implementation of BanRepository
#[derive(Clone)]
pub struct PgBanRepository {
    pool: PgPool,
}

impl PgBanRepository {
    /// Create a new PgBanRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM bans WHERE id = $1)")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

#[async_trait]
impl BanRepository for PgBanRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Ban>> {
        let result = sqlx::query_as::<_, BanModel>(
            r"
            SELECT id, issuer_id, target_node_id, reason, duration, expires_at,
                   requires_appeal, removed_by, removed_at, created_at, updated_at
            FROM bans
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Ban::from))
    }

    #[instrument(skip(self))]
    async fn find_page(
        &self,
        filter: BanFilter,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> RepoResult<Page<BanOverview>> {
        let live = matches!(filter, BanFilter::Active);

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM bans b WHERE {LIVE_PREDICATE} = $2"
        ))
        .bind(now)
        .bind(live)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, BanOverviewModel>(&format!(
            r"
            SELECT b.id, b.issuer_id, b.target_node_id, b.reason, b.duration, b.expires_at,
                   b.requires_appeal, b.removed_by, b.removed_at, b.created_at, b.updated_at,
                   a.handle AS issuer_handle,
                   n.name AS node_name,
                   (SELECT COUNT(*) FROM ban_details c
                     WHERE c.ban_id = b.id AND c.removed_at IS NULL) AS detail_count,
                   od.id AS detail_id,
                   od.handle AS detail_handle,
                   od.hardware_id AS detail_hardware_id,
                   od.network_address AS detail_network_address,
                   od.created_at AS detail_created_at,
                   od.updated_at AS detail_updated_at
            FROM bans b
            LEFT JOIN game_admins a ON a.id = b.issuer_id
            LEFT JOIN nodes n ON n.id = b.target_node_id
            LEFT JOIN LATERAL (
                SELECT d.id, d.handle, d.hardware_id, d.network_address, d.created_at, d.updated_at
                FROM ban_details d
                WHERE d.ban_id = b.id AND d.removed_at IS NULL
                ORDER BY d.created_at, d.id
                LIMIT 1
            ) od ON TRUE
            WHERE {LIVE_PREDICATE} = $2
            ORDER BY b.created_at DESC, b.id DESC
            LIMIT $3 OFFSET $4
            "
        ))
        .bind(now)
        .bind(live)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let items = rows
            .into_iter()
            .map(BanOverview::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total, page))
    }

    #[instrument(skip(self, ban, detail), fields(ban_id = %ban.id))]
    async fn create_with_detail(&self, ban: &Ban, detail: &BanDetail) -> RepoResult<()> {
        let columns = BanColumns::new(ban);
        let identity = DetailColumns::new(&detail.identity);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO bans (id, issuer_id, target_node_id, reason, duration, expires_at,
                              requires_appeal, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ",
        )
        .bind(columns.id)
        .bind(columns.issuer_id)
        .bind(columns.target_node_id)
        .bind(columns.reason)
        .bind(columns.duration)
        .bind(ban.expires_at)
        .bind(ban.requires_appeal)
        .bind(ban.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_fk_violation(e, || match ban.target_node_id {
                Some(node_id) => DomainError::NodeNotFound(node_id),
                None => DomainError::AdminNotFound(ban.issuer_id),
            })
        })?;

        sqlx::query(
            r"
            INSERT INTO ban_details (id, ban_id, handle, hardware_id, network_address,
                                     created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ",
        )
        .bind(detail.id.into_inner())
        .bind(columns.id)
        .bind(identity.handle)
        .bind(identity.hardware_id)
        .bind(identity.network_address)
        .bind(detail.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, ban, original_detail), fields(ban_id = %ban.id))]
    async fn update(&self, ban: &Ban, original_detail: Option<&BanDetail>) -> RepoResult<()> {
        let columns = BanColumns::new(ban);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE bans
            SET target_node_id = $2, reason = $3, duration = $4, expires_at = $5,
                requires_appeal = $6, updated_at = $7
            WHERE id = $1 AND removed_at IS NULL
            ",
        )
        .bind(columns.id)
        .bind(columns.target_node_id)
        .bind(columns.reason)
        .bind(columns.duration)
        .bind(ban.expires_at)
        .bind(ban.requires_appeal)
        .bind(ban.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_fk_violation(e, || {
                DomainError::NodeNotFound(ban.target_node_id.unwrap_or_default())
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(ban_not_found(ban.id));
        }

        if let Some(detail) = original_detail {
            let identity = DetailColumns::new(&detail.identity);
            let result = sqlx::query(
                r"
                UPDATE ban_details
                SET handle = $3, hardware_id = $4, network_address = $5, updated_at = $6
                WHERE id = $1 AND ban_id = $2 AND removed_at IS NULL
                ",
            )
            .bind(detail.id.into_inner())
            .bind(columns.id)
            .bind(identity.handle)
            .bind(identity.hardware_id)
            .bind(identity.network_address)
            .bind(detail.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if result.rows_affected() == 0 {
                return Err(detail_not_found(detail.id));
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn soft_delete(
        &self,
        id: Snowflake,
        removed_by: Snowflake,
        removed_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE bans
            SET removed_by = $2, removed_at = $3, updated_at = $3
            WHERE id = $1 AND removed_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(removed_by.into_inner())
        .bind(removed_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        if self.exists(id).await? {
            Ok(false)
        } else {
            Err(ban_not_found(id))
        }
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn soft_delete_many(
        &self,
        ids: &[Snowflake],
        removed_by: Snowflake,
        removed_at: DateTime<Utc>,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE bans
            SET removed_by = $2, removed_at = $3, updated_at = $3
            WHERE id = ANY($1) AND removed_at IS NULL
            ",
        )
        .bind(snowflake_ids(ids))
        .bind(removed_by.into_inner())
        .bind(removed_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
