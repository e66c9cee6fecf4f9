use std::sync::Arc;

use tracing::info;

use crate::{
    errors::{LabError, LabResult},
    models::{HistorySearchInput, HistorySearchResponse, HistorySeenLabResponse, LabSummary},
    pagination::{DEFAULT_HISTORY_LIMIT, ListQuery, Paginated},
    repositories::HistoryRepository,
    services::required,
};

pub struct HistoryService {
    history: Arc<dyn HistoryRepository>,
}

impl HistoryService {
    pub fn new(history: Arc<dyn HistoryRepository>) -> Self {
        Self { history }
    }

    pub async fn list_history_searches(
        &self,
        user_id: i64,
        query: &ListQuery,
    ) -> LabResult<Paginated<HistorySearchResponse>> {
        let page = query.page(DEFAULT_HISTORY_LIMIT);
        let (rows, total) = self.history.list_history_searches(user_id, page).await?;
        Ok(Paginated::new(rows, page, total).map(HistorySearchResponse::from))
    }

    pub async fn create_history_search(
        &self,
        user_id: i64,
        input: HistorySearchInput,
    ) -> LabResult<HistorySearchResponse> {
        let name = required("name", &input.name)?;
        let history = self.history.create_history_search(user_id, name).await?;
        Ok(history.into())
    }

    /// Entries belonging to other users are reported as missing.
    pub async fn delete_history_search(&self, user_id: i64, id: i64) -> LabResult<()> {
        match self.history.get_history_search_by_id(id).await? {
            Some(history) if history.user_id == user_id => {
                self.history.delete_history_search(id).await?;
                info!("User {} cleared search history entry {}", user_id, id);
                Ok(())
            }
            _ => Err(LabError::not_found(format!(
                "history search {} not found",
                id
            ))),
        }
    }

    pub async fn list_history_seen_labs(
        &self,
        user_id: i64,
        query: &ListQuery,
    ) -> LabResult<Paginated<HistorySeenLabResponse>> {
        let page = query.page(DEFAULT_HISTORY_LIMIT);
        let (rows, total) = self.history.list_history_seen_labs(user_id, page).await?;

        Ok(Paginated::new(rows, page, total).map(|(seen, lab)| HistorySeenLabResponse {
            id: seen.id,
            lab: LabSummary::from(&lab),
            created_at: seen.created_at,
            updated_at: seen.updated_at,
        }))
    }
}
