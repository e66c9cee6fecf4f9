use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    errors::{LabError, LabResult},
    models::{Lab, LabInput, LabResponse, NewLab, Viewer},
    pagination::{DEFAULT_LIMIT, ListQuery, Paginated},
    repositories::{HistoryRepository, LabRepository},
    services::{image_urls, required},
};

pub struct LabService {
    labs: Arc<dyn LabRepository>,
    history: Arc<dyn HistoryRepository>,
}

impl LabService {
    pub fn new(labs: Arc<dyn LabRepository>, history: Arc<dyn HistoryRepository>) -> Self {
        Self { labs, history }
    }

    pub async fn list_labs(&self, query: &ListQuery) -> LabResult<Paginated<LabResponse>> {
        let page = query.page(DEFAULT_LIMIT);
        let (labs, total) = self.labs.list_labs(page, query.term()).await?;
        debug!("Listed {} of {} labs", labs.len(), total);

        let mut items = Vec::with_capacity(labs.len());
        for lab in labs {
            let images = self.labs.get_lab_images(lab.id).await?;
            items.push(LabResponse::new(lab, images));
        }

        Ok(Paginated::new(items, page, total))
    }

    /// Same listing as [`LabService::list_labs`]; a user's non-empty search with at
    /// least one hit is remembered in their search history.
    pub async fn search_lab_available(
        &self,
        viewer: Viewer,
        query: &ListQuery,
    ) -> LabResult<Paginated<LabResponse>> {
        let result = self.list_labs(query).await?;

        if let (Viewer::User(user_id), Some(term)) = (viewer, query.term()) {
            if !result.items.is_empty() {
                self.history.create_history_search(user_id, term).await?;
            }
        }

        Ok(result)
    }

    pub async fn get_lab_by_id(&self, viewer: Viewer, id: i64) -> LabResult<LabResponse> {
        let lab = self.find(id).await?;
        let images = self.labs.get_lab_images(id).await?;

        if let Viewer::User(user_id) = viewer {
            self.history.record_seen_lab(user_id, id).await?;
        }

        Ok(LabResponse::new(lab, images))
    }

    pub async fn create_lab(&self, input: LabInput) -> LabResult<LabResponse> {
        let (new, images) = validate(input)?;
        let (lab, images) = self.labs.create_lab(new, images).await?;
        info!("Created lab {} ({})", lab.id, lab.name);
        Ok(LabResponse::new(lab, images))
    }

    pub async fn update_lab(&self, id: i64, input: LabInput) -> LabResult<LabResponse> {
        let (update, images) = validate(input)?;
        let existing = self.find(id).await?;
        let lab = Lab {
            name: update.name,
            description: update.description,
            ..existing
        };

        let (lab, images) = self.labs.save_lab(lab, images).await?;
        info!("Updated lab {} with {} images", lab.id, images.len());
        Ok(LabResponse::new(lab, images))
    }

    pub async fn delete_lab(&self, id: i64) -> LabResult<()> {
        self.find(id).await?;
        self.labs.delete_lab(id).await?;
        warn!("Deleted lab {} together with its bookings", id);
        Ok(())
    }

    async fn find(&self, id: i64) -> LabResult<Lab> {
        self.labs
            .get_lab_by_id(id)
            .await?
            .ok_or_else(|| LabError::not_found(format!("lab {} not found", id)))
    }
}

fn validate(input: LabInput) -> LabResult<(NewLab, Vec<String>)> {
    let name = required("name", &input.name)?;
    let description = required("description", &input.description)?;
    let images = input
        .lab_image
        .ok_or_else(|| LabError::validation("lab_image is required"))?;
    let images = image_urls("lab_image", images.into_iter().map(|i| i.image_url))?;

    Ok((NewLab { name, description }, images))
}
