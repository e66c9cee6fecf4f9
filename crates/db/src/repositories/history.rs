use async_trait::async_trait;
use eyre::Result;
use sqlx::{Pool, Postgres};

use labsched_core::{
    errors::LabResult,
    models::{HistorySearch, HistorySeenLab, Lab},
    pagination::Page,
    repositories::HistoryRepository,
};

use crate::models::{DbHistorySearch, DbHistorySeenLab, DbHistorySeenLabWithLab};

pub async fn list_history_searches(
    pool: &Pool<Postgres>,
    user_id: i64,
    page: Page,
) -> Result<(Vec<DbHistorySearch>, i64)> {
    let searches = sqlx::query_as::<_, DbHistorySearch>(
        r#"
        SELECT id, user_id, name, created_at, updated_at
        FROM history_searches
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    let total =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM history_searches WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    Ok((searches, total))
}

pub async fn get_history_search_by_id(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<DbHistorySearch>> {
    let search = sqlx::query_as::<_, DbHistorySearch>(
        "SELECT id, user_id, name, created_at, updated_at FROM history_searches WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(search)
}

pub async fn create_history_search(
    pool: &Pool<Postgres>,
    user_id: i64,
    name: &str,
) -> Result<DbHistorySearch> {
    let created = sqlx::query_as::<_, DbHistorySearch>(
        r#"
        INSERT INTO history_searches (user_id, name)
        VALUES ($1, $2)
        RETURNING id, user_id, name, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn delete_history_search(pool: &Pool<Postgres>, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM history_searches WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn list_history_seen_labs(
    pool: &Pool<Postgres>,
    user_id: i64,
    page: Page,
) -> Result<(Vec<DbHistorySeenLabWithLab>, i64)> {
    let rows = sqlx::query_as::<_, DbHistorySeenLabWithLab>(
        r#"
        SELECT h.id, h.user_id, h.lab_id, h.created_at, h.updated_at,
               l.name AS lab_name, l.description AS lab_description,
               l.created_at AS lab_created_at, l.updated_at AS lab_updated_at
        FROM history_seen_labs h
        JOIN labs l ON l.id = h.lab_id
        WHERE h.user_id = $1
        ORDER BY h.updated_at DESC, h.id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    let total =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM history_seen_labs WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    Ok((rows, total))
}

pub async fn record_seen_lab(
    pool: &Pool<Postgres>,
    user_id: i64,
    lab_id: i64,
) -> Result<DbHistorySeenLab> {
    let seen = sqlx::query_as::<_, DbHistorySeenLab>(
        r#"
        INSERT INTO history_seen_labs (user_id, lab_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, lab_id) DO UPDATE SET updated_at = NOW()
        RETURNING id, user_id, lab_id, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(lab_id)
    .fetch_one(pool)
    .await?;

    tracing::debug!("User {} viewed lab {}", user_id, lab_id);
    Ok(seen)
}

pub struct PgHistoryRepository {
    pool: Pool<Postgres>,
}

impl PgHistoryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRepository for PgHistoryRepository {
    async fn list_history_searches(
        &self,
        user_id: i64,
        page: Page,
    ) -> LabResult<(Vec<HistorySearch>, i64)> {
        let (rows, total) = list_history_searches(&self.pool, user_id, page).await?;
        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn get_history_search_by_id(&self, id: i64) -> LabResult<Option<HistorySearch>> {
        Ok(get_history_search_by_id(&self.pool, id).await?.map(Into::into))
    }

    async fn create_history_search(
        &self,
        user_id: i64,
        name: String,
    ) -> LabResult<HistorySearch> {
        Ok(create_history_search(&self.pool, user_id, &name).await?.into())
    }

    async fn delete_history_search(&self, id: i64) -> LabResult<()> {
        Ok(delete_history_search(&self.pool, id).await?)
    }

    async fn list_history_seen_labs(
        &self,
        user_id: i64,
        page: Page,
    ) -> LabResult<(Vec<(HistorySeenLab, Lab)>, i64)> {
        let (rows, total) = list_history_seen_labs(&self.pool, user_id, page).await?;
        Ok((
            rows.into_iter()
                .map(DbHistorySeenLabWithLab::into_parts)
                .collect(),
            total,
        ))
    }

    async fn record_seen_lab(&self, user_id: i64, lab_id: i64) -> LabResult<HistorySeenLab> {
        Ok(record_seen_lab(&self.pool, user_id, lab_id).await?.into())
    }
}
