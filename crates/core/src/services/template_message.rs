use std::sync::Arc;

use tracing::info;

use crate::{
    errors::{LabError, LabResult},
    models::{NewTemplateMessage, TemplateMessage, TemplateMessageInput, TemplateMessageResponse},
    repositories::TemplateMessageRepository,
    services::required,
};

pub struct TemplateMessageService {
    templates: Arc<dyn TemplateMessageRepository>,
}

impl TemplateMessageService {
    pub fn new(templates: Arc<dyn TemplateMessageRepository>) -> Self {
        Self { templates }
    }

    pub async fn list_template_messages(&self) -> LabResult<Vec<TemplateMessageResponse>> {
        let templates = self.templates.list_template_messages().await?;
        Ok(templates.into_iter().map(Into::into).collect())
    }

    pub async fn get_template_message_by_id(&self, id: i64) -> LabResult<TemplateMessageResponse> {
        self.find(id).await.map(Into::into)
    }

    pub async fn create_template_message(
        &self,
        input: TemplateMessageInput,
    ) -> LabResult<TemplateMessageResponse> {
        let new = NewTemplateMessage {
            title: required("title", &input.title)?,
            content: required("content", &input.content)?,
        };
        let template = self.templates.create_template_message(new).await?;
        info!("Created template message {}", template.id);
        Ok(template.into())
    }

    pub async fn update_template_message(
        &self,
        id: i64,
        input: TemplateMessageInput,
    ) -> LabResult<TemplateMessageResponse> {
        let title = required("title", &input.title)?;
        let content = required("content", &input.content)?;
        let existing = self.find(id).await?;

        let template = self
            .templates
            .save_template_message(TemplateMessage {
                title,
                content,
                ..existing
            })
            .await?;
        info!("Updated template message {}", template.id);
        Ok(template.into())
    }

    async fn find(&self, id: i64) -> LabResult<TemplateMessage> {
        self.templates
            .get_template_message_by_id(id)
            .await?
            .ok_or_else(|| LabError::not_found(format!("template message {} not found", id)))
    }
}
