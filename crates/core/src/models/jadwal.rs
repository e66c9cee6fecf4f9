use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::LabError, models::time_slot::TimeSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JadwalStatus {
    NotUsed,
    InUsed,
    Finished,
}

impl JadwalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JadwalStatus::NotUsed => "notused",
            JadwalStatus::InUsed => "inused",
            JadwalStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for JadwalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JadwalStatus {
    type Err = LabError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "notused" => Ok(JadwalStatus::NotUsed),
            "inused" => Ok(JadwalStatus::InUsed),
            "finished" => Ok(JadwalStatus::Finished),
            other => Err(LabError::validation(format!(
                "invalid jadwal status '{}', expected notused, inused or finished",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Jadwal {
    pub id: i64,
    pub tanggal_jadwal: NaiveDate,
    pub waktu_jadwal: TimeSlot,
    pub name_user: String,
    pub name_laboratorium: String,
    pub status: JadwalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeritaAcaraImage {
    pub id: i64,
    pub jadwal_id: i64,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewJadwal {
    pub tanggal_jadwal: NaiveDate,
    pub waktu_jadwal: TimeSlot,
    pub name_user: String,
    pub name_laboratorium: String,
    pub status: JadwalStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeritaAcaraImageInput {
    pub beritaacara_image_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JadwalInput {
    pub tanggal_jadwal: Option<String>,
    pub waktu_jadwal: String,
    pub name_user: String,
    #[serde(rename = "name_lab")]
    pub name_laboratorium: String,
    pub beritaacara_image: Vec<BeritaAcaraImageInput>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeritaAcaraImageResponse {
    pub jadwal_id: i64,
    pub beritaacara_image_url: String,
}

impl From<BeritaAcaraImage> for BeritaAcaraImageResponse {
    fn from(image: BeritaAcaraImage) -> Self {
        Self {
            jadwal_id: image.jadwal_id,
            beritaacara_image_url: image.image_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JadwalResponse {
    pub jadwal_id: i64,
    pub tanggal_jadwal: NaiveDate,
    pub waktu_jadwal: TimeSlot,
    pub name_user: String,
    #[serde(rename = "name_lab")]
    pub name_laboratorium: String,
    pub beritaacara_image: Vec<BeritaAcaraImageResponse>,
    pub status: JadwalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JadwalResponse {
    pub fn new(jadwal: Jadwal, images: Vec<BeritaAcaraImage>) -> Self {
        Self {
            jadwal_id: jadwal.id,
            tanggal_jadwal: jadwal.tanggal_jadwal,
            waktu_jadwal: jadwal.waktu_jadwal,
            name_user: jadwal.name_user,
            name_laboratorium: jadwal.name_laboratorium,
            beritaacara_image: images
                .into_iter()
                .map(BeritaAcaraImageResponse::from)
                .collect(),
            status: jadwal.status,
            created_at: jadwal.created_at,
            updated_at: jadwal.updated_at,
        }
    }
}
