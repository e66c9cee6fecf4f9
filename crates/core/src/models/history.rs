use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::lab::LabSummary;

#[derive(Debug, Clone, PartialEq)]
pub struct HistorySearch {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row per (user, lab); `updated_at` is the last time the user opened the lab.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySeenLab {
    pub id: i64,
    pub user_id: i64,
    pub lab_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySearchInput {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySearchResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HistorySearch> for HistorySearchResponse {
    fn from(history: HistorySearch) -> Self {
        Self {
            id: history.id,
            user_id: history.user_id,
            name: history.name,
            created_at: history.created_at,
            updated_at: history.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySeenLabResponse {
    pub id: i64,
    pub lab: LabSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
