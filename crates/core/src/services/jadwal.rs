use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    errors::{LabError, LabResult},
    models::{
        Jadwal, JadwalInput, JadwalResponse, JadwalStatus, NewJadwal, TimeSlot, Viewer,
        parse_date, today,
    },
    pagination::{DEFAULT_LIMIT, ListQuery, Paginated},
    repositories::{JadwalRepository, LabRepository, UserRepository},
    services::{image_urls, required},
};

pub struct JadwalService {
    jadwals: Arc<dyn JadwalRepository>,
    labs: Arc<dyn LabRepository>,
    users: Arc<dyn UserRepository>,
    verify_lab_name: bool,
}

impl JadwalService {
    pub fn new(
        jadwals: Arc<dyn JadwalRepository>,
        labs: Arc<dyn LabRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            jadwals,
            labs,
            users,
            verify_lab_name: false,
        }
    }

    /// Rejects create/update payloads whose `name_lab` matches no existing lab.
    pub fn with_lab_name_verification(mut self, enabled: bool) -> Self {
        self.verify_lab_name = enabled;
        self
    }

    pub async fn list_jadwals(&self, query: &ListQuery) -> LabResult<Paginated<JadwalResponse>> {
        let page = query.page(DEFAULT_LIMIT);
        let (rows, total) = self.jadwals.list_jadwals(page, query.term()).await?;
        debug!("Listed {} of {} jadwal", rows.len(), total);

        let mut items = Vec::with_capacity(rows.len());
        for jadwal in rows {
            let images = self.jadwals.get_berita_acara_images(jadwal.id).await?;
            items.push(JadwalResponse::new(jadwal, images));
        }

        Ok(Paginated::new(items, page, total))
    }

    pub async fn search_jadwal_available(
        &self,
        query: &ListQuery,
    ) -> LabResult<Paginated<JadwalResponse>> {
        self.list_jadwals(query).await
    }

    /// A regular user only sees slots recorded under their own full name.
    pub async fn get_jadwal_by_id(&self, viewer: Viewer, id: i64) -> LabResult<JadwalResponse> {
        let jadwal = self.find(id).await?;

        if let Viewer::User(user_id) = viewer {
            let user = self
                .users
                .get_user_by_id(user_id)
                .await?
                .ok_or_else(|| LabError::not_found(format!("user {} not found", user_id)))?;
            if user.full_name != jadwal.name_user {
                return Err(LabError::not_found(format!("jadwal {} not found", id)));
            }
        }

        let images = self.jadwals.get_berita_acara_images(id).await?;
        Ok(JadwalResponse::new(jadwal, images))
    }

    /// New slots always start as `notused`.
    pub async fn create_jadwal(&self, input: JadwalInput) -> LabResult<JadwalResponse> {
        let tanggal_jadwal = required_date(input.tanggal_jadwal.as_deref())?;
        if tanggal_jadwal < today() {
            return Err(past_date(tanggal_jadwal));
        }
        let waktu_jadwal: TimeSlot = required("waktu_jadwal", &input.waktu_jadwal)?.parse()?;
        let name_user = required("name_user", &input.name_user)?;
        let name_laboratorium = required("name_lab", &input.name_laboratorium)?;
        let images = image_urls(
            "beritaacara_image",
            input
                .beritaacara_image
                .into_iter()
                .map(|i| i.beritaacara_image_url),
        )?;
        self.check_lab_name(&name_laboratorium).await?;

        let new = NewJadwal {
            tanggal_jadwal,
            waktu_jadwal,
            name_user,
            name_laboratorium,
            status: JadwalStatus::NotUsed,
        };
        let (jadwal, images) = self.jadwals.create_jadwal(new, images).await?;
        info!(
            "Created jadwal {} for {} on {}",
            jadwal.id, jadwal.name_laboratorium, jadwal.tanggal_jadwal
        );

        Ok(JadwalResponse::new(jadwal, images))
    }

    /// Full overwrite. Unused slots may not sit in the past, and used or finished
    /// slots may not sit in the future.
    pub async fn update_jadwal(&self, id: i64, input: JadwalInput) -> LabResult<JadwalResponse> {
        let waktu_jadwal: TimeSlot = required("waktu_jadwal", &input.waktu_jadwal)?.parse()?;
        let name_user = required("name_user", &input.name_user)?;
        let name_laboratorium = required("name_lab", &input.name_laboratorium)?;
        let status: JadwalStatus = required("status", &input.status)?.parse()?;
        if input.beritaacara_image.is_empty() {
            return Err(LabError::validation("beritaacara_image is required"));
        }
        let images = image_urls(
            "beritaacara_image",
            input
                .beritaacara_image
                .into_iter()
                .map(|i| i.beritaacara_image_url),
        )?;
        let tanggal_jadwal = required_date(input.tanggal_jadwal.as_deref())?;
        let now = today();
        match status {
            JadwalStatus::NotUsed if tanggal_jadwal < now => {
                return Err(past_date(tanggal_jadwal));
            }
            JadwalStatus::InUsed | JadwalStatus::Finished if tanggal_jadwal > now => {
                return Err(LabError::validation(format!(
                    "invalid date for tanggal_jadwal: a {} slot cannot be dated {}",
                    status, tanggal_jadwal
                )));
            }
            _ => {}
        }
        self.check_lab_name(&name_laboratorium).await?;

        let existing = self.find(id).await?;
        let jadwal = Jadwal {
            tanggal_jadwal,
            waktu_jadwal,
            name_user,
            name_laboratorium,
            status,
            ..existing
        };

        let (jadwal, images) = self.jadwals.save_jadwal(jadwal, images).await?;
        info!("Updated jadwal {} ({})", jadwal.id, jadwal.status);

        Ok(JadwalResponse::new(jadwal, images))
    }

    pub async fn delete_jadwal(&self, id: i64) -> LabResult<()> {
        self.find(id).await?;
        self.jadwals.delete_jadwal(id).await?;
        info!("Deleted jadwal {}", id);
        Ok(())
    }

    async fn find(&self, id: i64) -> LabResult<Jadwal> {
        self.jadwals
            .get_jadwal_by_id(id)
            .await?
            .ok_or_else(|| LabError::not_found(format!("jadwal {} not found", id)))
    }

    async fn check_lab_name(&self, name: &str) -> LabResult<()> {
        if !self.verify_lab_name {
            return Ok(());
        }
        match self.labs.get_lab_by_name(name.to_string()).await? {
            Some(_) => Ok(()),
            None => Err(LabError::validation(format!(
                "name_lab '{}' does not match any lab",
                name
            ))),
        }
    }
}

fn required_date(value: Option<&str>) -> LabResult<NaiveDate> {
    let raw = value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| LabError::validation("tanggal_jadwal is required"))?;
    parse_date("tanggal_jadwal", raw)
}

fn past_date(date: NaiveDate) -> LabError {
    LabError::validation(format!(
        "invalid date for tanggal_jadwal: {} is before today",
        date
    ))
}
