use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    errors::{LabError, LabResult},
    models::{
        LabSummary, NewNotification, NewPeminjaman, Peminjaman, PeminjamanFilter,
        PeminjamanInput, PeminjamanResponse, PeminjamanStatus, SuratRekomendasiImage,
        SuratRekomendasiImageResponse, TimeSlot, UserSummary, Viewer, parse_date, today,
    },
    pagination::{DEFAULT_LIMIT, ListQuery, Paginated},
    repositories::{LabRepository, PeminjamanRepository, UserRepository},
    services::{image_urls, required},
};

/// Booking workflow: request, review, resolve.
pub struct PeminjamanService {
    peminjaman: Arc<dyn PeminjamanRepository>,
    labs: Arc<dyn LabRepository>,
    users: Arc<dyn UserRepository>,
}

impl PeminjamanService {
    pub fn new(
        peminjaman: Arc<dyn PeminjamanRepository>,
        labs: Arc<dyn LabRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            peminjaman,
            labs,
            users,
        }
    }

    pub async fn list_peminjamans(
        &self,
        viewer: Viewer,
        query: &ListQuery,
    ) -> LabResult<Paginated<PeminjamanResponse>> {
        let status = match query.status.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(raw.parse::<PeminjamanStatus>()?),
            _ => None,
        };
        let page = query.page(DEFAULT_LIMIT);
        let filter = PeminjamanFilter {
            viewer,
            lab_name: query.term(),
            status,
            page,
        };

        let (rows, total) = self.peminjaman.list_peminjamans(filter).await?;
        debug!("Listed {} of {} peminjaman", rows.len(), total);

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let images = self.peminjaman.get_surat_rekomendasi_images(row.id).await?;
            items.push(self.to_response(row, images).await?);
        }

        Ok(Paginated::new(items, page, total))
    }

    pub async fn get_peminjaman_by_id(
        &self,
        viewer: Viewer,
        id: i64,
    ) -> LabResult<PeminjamanResponse> {
        let peminjaman = self.find(id, viewer).await?;
        let images = self.peminjaman.get_surat_rekomendasi_images(id).await?;
        self.to_response(peminjaman, images).await
    }

    /// Files a new booking for `user_id`. The stored status is always `request`.
    pub async fn create_peminjaman(
        &self,
        user_id: i64,
        input: PeminjamanInput,
    ) -> LabResult<PeminjamanResponse> {
        let jam_peminjaman: TimeSlot =
            required("jam_peminjaman", &input.jam_peminjaman)?.parse()?;
        let tanggal_peminjaman = upcoming_date(input.tanggal_peminjaman.as_deref())?
            .ok_or_else(|| LabError::validation("tanggal_peminjaman is required"))?;
        let images = image_urls(
            "suratrekomendasi_image",
            input.surat_rekomendasi_image.into_iter().map(|i| i.image_url),
        )?;
        let lab_id = input
            .lab_id
            .ok_or_else(|| LabError::validation("lab_id is required"))?;

        if self.labs.get_lab_by_id(lab_id).await?.is_none() {
            return Err(LabError::not_found(format!("lab {} not found", lab_id)));
        }

        let new = NewPeminjaman {
            user_id,
            lab_id,
            tanggal_peminjaman,
            jam_peminjaman,
            description: input.description.trim().to_string(),
            status: PeminjamanStatus::Request,
        };

        let (peminjaman, images) = self.peminjaman.create_peminjaman(new, images).await?;
        info!(
            "User {} requested lab {} on {} at {}",
            user_id, lab_id, peminjaman.tanggal_peminjaman, peminjaman.jam_peminjaman
        );

        self.to_response(peminjaman, images).await
    }

    /// Reviews a booking. Every check runs before anything is written; resolving to
    /// `accept` or `reject` also notifies the booking owner in the same write.
    pub async fn update_peminjaman(
        &self,
        viewer: Viewer,
        id: i64,
        input: PeminjamanInput,
    ) -> LabResult<PeminjamanResponse> {
        let description = required("description", &input.description)?;
        let jam_peminjaman: TimeSlot =
            required("jam_peminjaman", &input.jam_peminjaman)?.parse()?;
        let next_status: PeminjamanStatus = required("status", &input.status)?.parse()?;
        if input.surat_rekomendasi_image.is_empty() {
            return Err(LabError::validation("suratrekomendasi_image is required"));
        }
        let images = image_urls(
            "suratrekomendasi_image",
            input.surat_rekomendasi_image.into_iter().map(|i| i.image_url),
        )?;
        let tanggal_peminjaman = upcoming_date(input.tanggal_peminjaman.as_deref())?;

        let mut peminjaman = self.find(id, viewer).await?;
        let previous = peminjaman.status;
        let status = previous.transition_to(next_status)?;

        if let Some(lab_id) = input.lab_id {
            if self.labs.get_lab_by_id(lab_id).await?.is_none() {
                return Err(LabError::not_found(format!("lab {} not found", lab_id)));
            }
            peminjaman.lab_id = lab_id;
        }
        if let Some(date) = tanggal_peminjaman {
            peminjaman.tanggal_peminjaman = date;
        }
        peminjaman.jam_peminjaman = jam_peminjaman;
        peminjaman.description = description;
        peminjaman.status = status;

        let notification = status.notification_template().map(|template_id| NewNotification {
            user_id: peminjaman.user_id,
            template_id,
            peminjaman_id: Some(peminjaman.id),
        });

        let (peminjaman, images) = self
            .peminjaman
            .save_peminjaman(peminjaman, previous, images, notification)
            .await?;
        info!("Peminjaman {} is now {}", peminjaman.id, peminjaman.status);

        self.to_response(peminjaman, images).await
    }

    pub async fn delete_peminjaman(&self, id: i64) -> LabResult<()> {
        self.find(id, Viewer::Admin).await?;
        self.peminjaman.delete_peminjaman(id).await?;
        info!("Deleted peminjaman {}", id);
        Ok(())
    }

    async fn find(&self, id: i64, viewer: Viewer) -> LabResult<Peminjaman> {
        self.peminjaman
            .get_peminjaman_by_id(id, viewer)
            .await?
            .ok_or_else(|| LabError::not_found(format!("peminjaman {} not found", id)))
    }

    async fn to_response(
        &self,
        peminjaman: Peminjaman,
        images: Vec<SuratRekomendasiImage>,
    ) -> LabResult<PeminjamanResponse> {
        let lab = self
            .labs
            .get_lab_by_id(peminjaman.lab_id)
            .await?
            .ok_or_else(|| LabError::not_found(format!("lab {} not found", peminjaman.lab_id)))?;
        // Soft-deleted owners are omitted rather than failing the read.
        let user = self.users.get_user_by_id(peminjaman.user_id).await?;

        Ok(PeminjamanResponse {
            peminjaman_id: peminjaman.id,
            tanggal_peminjaman: peminjaman.tanggal_peminjaman,
            jam_peminjaman: peminjaman.jam_peminjaman,
            surat_rekomendasi_image: images
                .into_iter()
                .map(SuratRekomendasiImageResponse::from)
                .collect(),
            description: peminjaman.description,
            status: peminjaman.status,
            lab: LabSummary::from(&lab),
            user: user.as_ref().map(UserSummary::from),
            created_at: peminjaman.created_at,
            updated_at: peminjaman.updated_at,
        })
    }
}

/// Parses an optional booking date and rejects anything before today.
fn upcoming_date(value: Option<&str>) -> LabResult<Option<NaiveDate>> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    let date = parse_date("tanggal_peminjaman", raw)?;
    if date < today() {
        return Err(LabError::validation(format!(
            "invalid date for tanggal_peminjaman: '{}' is before today",
            raw
        )));
    }
    Ok(Some(date))
}
