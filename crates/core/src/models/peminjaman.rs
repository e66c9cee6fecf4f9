use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{LabError, LabResult},
    models::{
        lab::LabSummary,
        notification::{TEMPLATE_PEMINJAMAN_ACCEPTED, TEMPLATE_PEMINJAMAN_REJECTED},
        time_slot::TimeSlot,
        user::{UserSummary, Viewer},
    },
    pagination::Page,
};

/// Booking lifecycle: every booking starts at `Request` and is resolved once,
/// to either `Accept` or `Reject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeminjamanStatus {
    Request,
    Accept,
    Reject,
}

impl PeminjamanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeminjamanStatus::Request => "request",
            PeminjamanStatus::Accept => "accept",
            PeminjamanStatus::Reject => "reject",
        }
    }

    /// Validates a transition out of `self`.
    pub fn transition_to(self, next: PeminjamanStatus) -> LabResult<PeminjamanStatus> {
        if next == self {
            return Err(LabError::validation(format!(
                "peminjaman is already '{}'",
                self
            )));
        }
        match (self, next) {
            (_, PeminjamanStatus::Request) => Err(LabError::validation(
                "peminjaman status cannot be set back to 'request'",
            )),
            (PeminjamanStatus::Request, next) => Ok(next),
            (current, _) => Err(LabError::validation(format!(
                "peminjaman was already resolved as '{}'",
                current
            ))),
        }
    }

    /// Template announcing this status to the booking owner, if any.
    pub fn notification_template(&self) -> Option<i64> {
        match self {
            PeminjamanStatus::Request => None,
            PeminjamanStatus::Accept => Some(TEMPLATE_PEMINJAMAN_ACCEPTED),
            PeminjamanStatus::Reject => Some(TEMPLATE_PEMINJAMAN_REJECTED),
        }
    }
}

impl fmt::Display for PeminjamanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeminjamanStatus {
    type Err = LabError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "request" => Ok(PeminjamanStatus::Request),
            "accept" => Ok(PeminjamanStatus::Accept),
            "reject" => Ok(PeminjamanStatus::Reject),
            other => Err(LabError::validation(format!(
                "invalid peminjaman status '{}', expected request, accept or reject",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Peminjaman {
    pub id: i64,
    pub user_id: i64,
    pub lab_id: i64,
    pub tanggal_peminjaman: NaiveDate,
    pub jam_peminjaman: TimeSlot,
    pub description: String,
    pub status: PeminjamanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuratRekomendasiImage {
    pub id: i64,
    pub peminjaman_id: i64,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPeminjaman {
    pub user_id: i64,
    pub lab_id: i64,
    pub tanggal_peminjaman: NaiveDate,
    pub jam_peminjaman: TimeSlot,
    pub description: String,
    pub status: PeminjamanStatus,
}

/// Repository-level listing filter.
#[derive(Debug, Clone, PartialEq)]
pub struct PeminjamanFilter {
    pub viewer: Viewer,
    pub lab_name: Option<String>,
    pub status: Option<PeminjamanStatus>,
    pub page: Page,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuratRekomendasiImageInput {
    pub image_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeminjamanInput {
    pub lab_id: Option<i64>,
    pub tanggal_peminjaman: Option<String>,
    pub jam_peminjaman: String,
    #[serde(rename = "suratrekomendasi_image")]
    pub surat_rekomendasi_image: Vec<SuratRekomendasiImageInput>,
    pub description: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuratRekomendasiImageResponse {
    pub peminjaman_id: i64,
    pub image_url: String,
}

impl From<SuratRekomendasiImage> for SuratRekomendasiImageResponse {
    fn from(image: SuratRekomendasiImage) -> Self {
        Self {
            peminjaman_id: image.peminjaman_id,
            image_url: image.image_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeminjamanResponse {
    pub peminjaman_id: i64,
    pub tanggal_peminjaman: NaiveDate,
    pub jam_peminjaman: TimeSlot,
    #[serde(rename = "suratrekomendasi_image")]
    pub surat_rekomendasi_image: Vec<SuratRekomendasiImageResponse>,
    pub description: String,
    pub status: PeminjamanStatus,
    pub lab: LabSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
