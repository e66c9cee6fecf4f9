use async_trait::async_trait;
use eyre::Result;
use sqlx::{Pool, Postgres};

use labsched_core::{
    errors::LabResult,
    models::{NewTemplateMessage, TemplateMessage},
    repositories::TemplateMessageRepository,
};

use crate::models::DbTemplateMessage;

pub async fn list_template_messages(pool: &Pool<Postgres>) -> Result<Vec<DbTemplateMessage>> {
    let templates = sqlx::query_as::<_, DbTemplateMessage>(
        "SELECT id, title, content, created_at, updated_at FROM template_messages ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(templates)
}

pub async fn get_template_message_by_id(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<DbTemplateMessage>> {
    let template = sqlx::query_as::<_, DbTemplateMessage>(
        "SELECT id, title, content, created_at, updated_at FROM template_messages WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(template)
}

pub async fn create_template_message(
    pool: &Pool<Postgres>,
    template: &NewTemplateMessage,
) -> Result<DbTemplateMessage> {
    let created = sqlx::query_as::<_, DbTemplateMessage>(
        r#"
        INSERT INTO template_messages (title, content)
        VALUES ($1, $2)
        RETURNING id, title, content, created_at, updated_at
        "#,
    )
    .bind(&template.title)
    .bind(&template.content)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Template message created: id={}", created.id);
    Ok(created)
}

pub async fn save_template_message(
    pool: &Pool<Postgres>,
    template: &TemplateMessage,
) -> Result<DbTemplateMessage> {
    let saved = sqlx::query_as::<_, DbTemplateMessage>(
        r#"
        UPDATE template_messages
        SET title = $2, content = $3, updated_at = NOW()
        WHERE id = $1
        RETURNING id, title, content, created_at, updated_at
        "#,
    )
    .bind(template.id)
    .bind(&template.title)
    .bind(&template.content)
    .fetch_one(pool)
    .await?;

    Ok(saved)
}

pub struct PgTemplateMessageRepository {
    pool: Pool<Postgres>,
}

impl PgTemplateMessageRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateMessageRepository for PgTemplateMessageRepository {
    async fn list_template_messages(&self) -> LabResult<Vec<TemplateMessage>> {
        let rows = list_template_messages(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_template_message_by_id(&self, id: i64) -> LabResult<Option<TemplateMessage>> {
        Ok(get_template_message_by_id(&self.pool, id)
            .await?
            .map(Into::into))
    }

    async fn create_template_message(
        &self,
        template: NewTemplateMessage,
    ) -> LabResult<TemplateMessage> {
        Ok(create_template_message(&self.pool, &template).await?.into())
    }

    async fn save_template_message(
        &self,
        template: TemplateMessage,
    ) -> LabResult<TemplateMessage> {
        Ok(save_template_message(&self.pool, &template).await?.into())
    }
}
