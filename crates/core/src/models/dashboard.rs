use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw counters for the unfiltered dashboard, one query each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardTotals {
    pub users: i64,
    pub users_today: i64,
    pub labs: i64,
    pub peminjaman: i64,
    pub peminjaman_today: i64,
    pub jadwal: i64,
    pub jadwal_today: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyTotals {
    pub users: i64,
    pub labs: i64,
    pub peminjaman: i64,
    pub jadwal: i64,
}

/// Recent booking row joined with the lab name.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentPeminjaman {
    pub id: i64,
    pub lab_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabCount {
    pub name: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountUser {
    pub total_user: i64,
    pub total_user_today: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountLab {
    pub total_lab: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountPeminjaman {
    pub total_peminjaman: i64,
    pub total_peminjaman_today: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountJadwal {
    pub total_jadwal: i64,
    pub total_jadwal_today: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPeminjamanEntry {
    pub id: i64,
    pub peminjaman_name: String,
    pub kegiatan: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJadwalEntry {
    pub id: i64,
    pub name_laboratorium: String,
    pub kegiatan: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUserEntry {
    pub id: i64,
    pub full_name: String,
    pub nim_nip: String,
    pub profile_picture: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTeraktifMeminjam {
    pub full_name: String,
    pub jumlah_peminjaman: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub count_user: CountUser,
    pub count_lab: CountLab,
    pub count_peminjaman: CountPeminjaman,
    pub count_jadwal: CountJadwal,
    pub new_peminjaman: Vec<NewPeminjamanEntry>,
    pub new_jadwal: Vec<NewJadwalEntry>,
    pub new_user: Vec<NewUserEntry>,
    pub user_teraktif_meminjam: Vec<UserTeraktifMeminjam>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCountUser {
    pub total_user: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCountPeminjaman {
    pub total_peminjaman: i64,
    pub per_lab: Vec<LabCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCountJadwal {
    pub total_jadwal: i64,
    pub per_lab: Vec<LabCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFilterResponse {
    pub month: u32,
    pub year: i32,
    pub count_user: MonthlyCountUser,
    pub count_lab: CountLab,
    pub count_peminjaman: MonthlyCountPeminjaman,
    pub count_jadwal: MonthlyCountJadwal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardFilterQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}
