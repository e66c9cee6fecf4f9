use async_trait::async_trait;
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};

use labsched_core::{
    errors::LabResult,
    models::{NewNotification, Notification},
    repositories::NotificationRepository,
};

use crate::models::DbNotification;

pub async fn list_notifications_by_user(
    pool: &Pool<Postgres>,
    user_id: i64,
) -> Result<Vec<DbNotification>> {
    let notifications = sqlx::query_as::<_, DbNotification>(
        r#"
        SELECT id, user_id, template_id, peminjaman_id, created_at, updated_at
        FROM notifications
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    tracing::debug!(
        "Found {} notifications for user {}",
        notifications.len(),
        user_id
    );
    Ok(notifications)
}

/// Runs on the caller's connection so it can join a booking update transaction.
pub async fn insert_notification(
    conn: &mut PgConnection,
    notification: &NewNotification,
) -> Result<DbNotification> {
    let created = sqlx::query_as::<_, DbNotification>(
        r#"
        INSERT INTO notifications (user_id, template_id, peminjaman_id)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, template_id, peminjaman_id, created_at, updated_at
        "#,
    )
    .bind(notification.user_id)
    .bind(notification.template_id)
    .bind(notification.peminjaman_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(created)
}

pub struct PgNotificationRepository {
    pool: Pool<Postgres>,
}

impl PgNotificationRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn list_notifications_by_user(&self, user_id: i64) -> LabResult<Vec<Notification>> {
        let rows = list_notifications_by_user(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
