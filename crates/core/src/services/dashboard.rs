use std::sync::Arc;

use tracing::debug;

use crate::{
    errors::{LabError, LabResult},
    models::{
        CountJadwal, CountLab, CountPeminjaman, CountUser, DashboardFilterResponse,
        DashboardResponse, MonthlyCountJadwal, MonthlyCountPeminjaman, MonthlyCountUser,
        NewJadwalEntry, NewPeminjamanEntry, NewUserEntry, today,
    },
    repositories::DashboardRepository,
};

pub const RECENT_LIMIT: i64 = 10;
pub const MOST_ACTIVE_LIMIT: i64 = 3;

pub struct DashboardService {
    dashboard: Arc<dyn DashboardRepository>,
}

impl DashboardService {
    pub fn new(dashboard: Arc<dyn DashboardRepository>) -> Self {
        Self { dashboard }
    }

    pub async fn dashboard_get_all(&self) -> LabResult<DashboardResponse> {
        let totals = self.dashboard.totals(today()).await?;
        debug!(?totals, "Loaded dashboard totals");

        let mut new_peminjaman: Vec<NewPeminjamanEntry> = self
            .dashboard
            .recent_peminjamans(RECENT_LIMIT)
            .await?
            .into_iter()
            .map(|row| NewPeminjamanEntry {
                id: row.id,
                peminjaman_name: row.lab_name,
                kegiatan: "Peminjaman".to_string(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
            .collect();
        new_peminjaman.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        new_peminjaman.truncate(RECENT_LIMIT as usize);

        let mut new_jadwal: Vec<NewJadwalEntry> = self
            .dashboard
            .recent_jadwals(RECENT_LIMIT)
            .await?
            .into_iter()
            .map(|jadwal| NewJadwalEntry {
                id: jadwal.id,
                name_laboratorium: jadwal.name_laboratorium,
                kegiatan: "Jadwal Peminjaman".to_string(),
                created_at: jadwal.created_at,
                updated_at: jadwal.updated_at,
            })
            .collect();
        new_jadwal.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        new_jadwal.truncate(RECENT_LIMIT as usize);

        let mut new_user: Vec<NewUserEntry> = self
            .dashboard
            .recent_users(RECENT_LIMIT)
            .await?
            .into_iter()
            .map(|user| NewUserEntry {
                id: user.id,
                full_name: user.full_name,
                nim_nip: user.nim_nip,
                profile_picture: user.profile_picture,
                created_at: user.created_at,
                updated_at: user.updated_at,
            })
            .collect();
        new_user.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        new_user.truncate(RECENT_LIMIT as usize);

        let user_teraktif_meminjam = self
            .dashboard
            .most_active_borrowers(MOST_ACTIVE_LIMIT)
            .await?;

        Ok(DashboardResponse {
            count_user: CountUser {
                total_user: totals.users,
                total_user_today: totals.users_today,
            },
            count_lab: CountLab {
                total_lab: totals.labs,
            },
            count_peminjaman: CountPeminjaman {
                total_peminjaman: totals.peminjaman,
                total_peminjaman_today: totals.peminjaman_today,
            },
            count_jadwal: CountJadwal {
                total_jadwal: totals.jadwal,
                total_jadwal_today: totals.jadwal_today,
            },
            new_peminjaman,
            new_jadwal,
            new_user,
            user_teraktif_meminjam,
        })
    }

    /// Counts for one calendar month. `month` must be 1..=12 and `year` at least 1.
    pub async fn dashboard_get_by_month(
        &self,
        month: i64,
        year: i64,
    ) -> LabResult<DashboardFilterResponse> {
        let month = u32::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| {
                LabError::validation(format!("invalid month {}, expected 1 to 12", month))
            })?;
        let year = i32::try_from(year)
            .ok()
            .filter(|y| *y >= 1)
            .ok_or_else(|| LabError::validation(format!("invalid year {}", year)))?;

        let totals = self.dashboard.monthly_totals(month, year).await?;
        let peminjaman_per_lab = self.dashboard.peminjaman_per_lab(month, year).await?;
        let jadwal_per_lab = self.dashboard.jadwal_per_lab(month, year).await?;

        Ok(DashboardFilterResponse {
            month,
            year,
            count_user: MonthlyCountUser {
                total_user: totals.users,
            },
            count_lab: CountLab {
                total_lab: totals.labs,
            },
            count_peminjaman: MonthlyCountPeminjaman {
                total_peminjaman: totals.peminjaman,
                per_lab: peminjaman_per_lab,
            },
            count_jadwal: MonthlyCountJadwal {
                total_jadwal: totals.jadwal,
                per_lab: jadwal_per_lab,
            },
        })
    }
}
