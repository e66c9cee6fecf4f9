use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token inside template titles and bodies that is replaced by the reader's full name.
pub const NAME_PLACEHOLDER: &str = "[Nama Pengguna]";

pub const TEMPLATE_PEMINJAMAN_ACCEPTED: i64 = 3;
pub const TEMPLATE_PEMINJAMAN_REJECTED: i64 = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub template_id: i64,
    pub peminjaman_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub user_id: i64,
    pub template_id: i64,
    pub peminjaman_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedNotification {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peminjaman_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub user_id: i64,
    pub notification_content: Vec<RenderedNotification>,
}

pub fn render_placeholder(text: &str, full_name: &str) -> String {
    text.replace(NAME_PLACEHOLDER, full_name)
}
