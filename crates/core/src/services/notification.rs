use std::sync::Arc;

use tracing::debug;

use crate::{
    errors::{LabError, LabResult},
    models::{NotificationResponse, RenderedNotification, render_placeholder},
    repositories::{NotificationRepository, TemplateMessageRepository, UserRepository},
};

/// Renders a user's notifications from their templates at read time.
pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
    templates: Arc<dyn TemplateMessageRepository>,
    users: Arc<dyn UserRepository>,
}

impl NotificationService {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        templates: Arc<dyn TemplateMessageRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            notifications,
            templates,
            users,
        }
    }

    /// A notification whose template cannot be loaded fails the whole response.
    pub async fn get_notifications_by_user_id(
        &self,
        user_id: i64,
    ) -> LabResult<NotificationResponse> {
        let user = self
            .users
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| LabError::not_found(format!("user {} not found", user_id)))?;
        let notifications = self.notifications.list_notifications_by_user(user_id).await?;
        debug!("Rendering {} notifications for user {}", notifications.len(), user_id);

        let mut rendered = Vec::with_capacity(notifications.len());
        for notification in notifications {
            let template = self
                .templates
                .get_template_message_by_id(notification.template_id)
                .await?
                .ok_or_else(|| {
                    LabError::not_found(format!(
                        "template message {} not found",
                        notification.template_id
                    ))
                })?;

            rendered.push(RenderedNotification {
                title: render_placeholder(&template.title, &user.full_name),
                content: render_placeholder(&template.content, &user.full_name),
                peminjaman_id: notification.peminjaman_id,
                created_at: notification.created_at,
                updated_at: notification.updated_at,
            });
        }

        Ok(NotificationResponse {
            user_id,
            notification_content: rendered,
        })
    }
}
