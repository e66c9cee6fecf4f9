//! Row types as stored in PostgreSQL, plus their conversion into core models.
//! Enumerated columns are `TEXT` guarded by `CHECK` constraints and parsed back
//! on the way out.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use labsched_core::{
    errors::LabError,
    models::{
        BeritaAcaraImage, HistorySearch, HistorySeenLab, Jadwal, Lab, LabImage, Notification,
        LabCount, Peminjaman, RecentPeminjaman, SuratRekomendasiImage, TemplateMessage, User, UserTeraktifMeminjam,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub nim_nip: String,
    pub profile_picture: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<DbUser> for User {
    type Error = LabError;

    fn try_from(row: DbUser) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            password_hash: row.password_hash,
            nim_nip: row.nim_nip,
            profile_picture: row.profile_picture,
            role: row.role.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLab {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbLab> for Lab {
    fn from(row: DbLab) -> Self {
        Lab {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLabImage {
    pub id: i64,
    pub lab_id: i64,
    pub image_url: String,
}

impl From<DbLabImage> for LabImage {
    fn from(row: DbLabImage) -> Self {
        LabImage {
            id: row.id,
            lab_id: row.lab_id,
            image_url: row.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbJadwal {
    pub id: i64,
    pub tanggal_jadwal: NaiveDate,
    pub waktu_jadwal: String,
    pub name_user: String,
    pub name_laboratorium: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbJadwal> for Jadwal {
    type Error = LabError;

    fn try_from(row: DbJadwal) -> Result<Self, Self::Error> {
        Ok(Jadwal {
            id: row.id,
            tanggal_jadwal: row.tanggal_jadwal,
            waktu_jadwal: row.waktu_jadwal.parse()?,
            name_user: row.name_user,
            name_laboratorium: row.name_laboratorium,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBeritaAcaraImage {
    pub id: i64,
    pub jadwal_id: i64,
    pub image_url: String,
}

impl From<DbBeritaAcaraImage> for BeritaAcaraImage {
    fn from(row: DbBeritaAcaraImage) -> Self {
        BeritaAcaraImage {
            id: row.id,
            jadwal_id: row.jadwal_id,
            image_url: row.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPeminjaman {
    pub id: i64,
    pub user_id: i64,
    pub lab_id: i64,
    pub tanggal_peminjaman: NaiveDate,
    pub jam_peminjaman: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbPeminjaman> for Peminjaman {
    type Error = LabError;

    fn try_from(row: DbPeminjaman) -> Result<Self, Self::Error> {
        Ok(Peminjaman {
            id: row.id,
            user_id: row.user_id,
            lab_id: row.lab_id,
            tanggal_peminjaman: row.tanggal_peminjaman,
            jam_peminjaman: row.jam_peminjaman.parse()?,
            description: row.description,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSuratRekomendasiImage {
    pub id: i64,
    pub peminjaman_id: i64,
    pub image_url: String,
}

impl From<DbSuratRekomendasiImage> for SuratRekomendasiImage {
    fn from(row: DbSuratRekomendasiImage) -> Self {
        SuratRekomendasiImage {
            id: row.id,
            peminjaman_id: row.peminjaman_id,
            image_url: row.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNotification {
    pub id: i64,
    pub user_id: i64,
    pub template_id: i64,
    pub peminjaman_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbNotification> for Notification {
    fn from(row: DbNotification) -> Self {
        Notification {
            id: row.id,
            user_id: row.user_id,
            template_id: row.template_id,
            peminjaman_id: row.peminjaman_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTemplateMessage {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbTemplateMessage> for TemplateMessage {
    fn from(row: DbTemplateMessage) -> Self {
        TemplateMessage {
            id: row.id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbHistorySearch {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbHistorySearch> for HistorySearch {
    fn from(row: DbHistorySearch) -> Self {
        HistorySearch {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbHistorySeenLab {
    pub id: i64,
    pub user_id: i64,
    pub lab_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbHistorySeenLab> for HistorySeenLab {
    fn from(row: DbHistorySeenLab) -> Self {
        HistorySeenLab {
            id: row.id,
            user_id: row.user_id,
            lab_id: row.lab_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A seen-lab entry joined with the lab it points at.
#[derive(Debug, Clone, FromRow)]
pub struct DbHistorySeenLabWithLab {
    pub id: i64,
    pub user_id: i64,
    pub lab_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lab_name: String,
    pub lab_description: String,
    pub lab_created_at: DateTime<Utc>,
    pub lab_updated_at: DateTime<Utc>,
}

impl DbHistorySeenLabWithLab {
    pub fn into_parts(self) -> (HistorySeenLab, Lab) {
        let row = self;
        (
            HistorySeenLab {
                id: row.id,
                user_id: row.user_id,
                lab_id: row.lab_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            Lab {
                id: row.lab_id,
                name: row.lab_name,
                description: row.lab_description,
                created_at: row.lab_created_at,
                updated_at: row.lab_updated_at,
            },
        )
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbRecentPeminjaman {
    pub id: i64,
    pub lab_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbRecentPeminjaman> for RecentPeminjaman {
    fn from(row: DbRecentPeminjaman) -> Self {
        RecentPeminjaman {
            id: row.id,
            lab_name: row.lab_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbLabCount {
    pub name: String,
    pub total: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbBorrowerCount {
    pub full_name: String,
    pub jumlah_peminjaman: i64,
}

impl From<DbLabCount> for LabCount {
    fn from(row: DbLabCount) -> Self {
        LabCount {
            name: row.name,
            total: row.total,
        }
    }
}

impl From<DbBorrowerCount> for UserTeraktifMeminjam {
    fn from(row: DbBorrowerCount) -> Self {
        UserTeraktifMeminjam {
            full_name: row.full_name,
            jumlah_peminjaman: row.jumlah_peminjaman,
        }
    }
}
