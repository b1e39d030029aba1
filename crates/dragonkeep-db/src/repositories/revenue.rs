//! PostgreSQL implementation of RevenueRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use dragonkeep_core::{RepoResult, Revenue, RevenueRepository};

use crate::models::RevenueModel;

use super::error::map_db_error;

/// PostgreSQL implementation of RevenueRepository
#[derive(Clone)]
pub struct PgRevenueRepository {
    pool: PgPool,
}

impl PgRevenueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevenueRepository for PgRevenueRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Revenue>> {
        let rows = sqlx::query_as::<_, RevenueModel>(
            r#"
            SELECT id, date, source, amount, description, created_at
            FROM revenues
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Revenue::try_from).collect()
    }

    #[instrument(skip(self, revenue), fields(revenue_id = %revenue.id))]
    async fn insert(&self, revenue: &Revenue) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO revenues (id, date, source, amount, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(revenue.id)
        .bind(revenue.date)
        .bind(revenue.source.as_str())
        .bind(revenue.amount)
        .bind(revenue.description.as_deref())
        .bind(revenue.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM revenues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
