//! Persistence seam.
//!
//! Services only ever talk to these traits. `labsched-db` implements them over
//! PostgreSQL; the generated `Mock*` types back the service and HTTP tests.
//! Lookups return `Ok(None)` for a missing row and leave the not-found wording
//! to the service.

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;

use crate::{
    errors::LabResult,
    models::{
        BeritaAcaraImage, DashboardTotals, HistorySearch, HistorySeenLab, Jadwal, Lab, LabCount,
        LabImage, MonthlyTotals, NewJadwal, NewLab, NewNotification, NewPeminjaman,
        NewTemplateMessage, NewUser, Notification, Peminjaman, PeminjamanFilter, PeminjamanStatus,
        RecentPeminjaman, SuratRekomendasiImage, TemplateMessage, User, UserTeraktifMeminjam,
        Viewer,
    },
    pagination::Page,
};

#[automock]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Active users only.
    async fn get_user_by_id(&self, id: i64) -> LabResult<Option<User>>;

    /// Searches soft-deleted rows too, so an address can never be registered twice.
    async fn get_user_by_email(&self, email: String) -> LabResult<Option<User>>;

    async fn create_user(&self, user: NewUser) -> LabResult<User>;

    async fn save_user(&self, user: User) -> LabResult<User>;

    async fn soft_delete_user(&self, id: i64) -> LabResult<()>;

    async fn list_users(
        &self,
        page: Page,
        search: Option<String>,
        include_deleted: bool,
    ) -> LabResult<(Vec<User>, i64)>;
}

#[automock]
#[async_trait]
pub trait LabRepository: Send + Sync {
    async fn list_labs(&self, page: Page, name: Option<String>) -> LabResult<(Vec<Lab>, i64)>;

    async fn get_lab_by_id(&self, id: i64) -> LabResult<Option<Lab>>;

    async fn get_lab_by_name(&self, name: String) -> LabResult<Option<Lab>>;

    async fn get_lab_images(&self, lab_id: i64) -> LabResult<Vec<LabImage>>;

    async fn create_lab(&self, lab: NewLab, images: Vec<String>)
    -> LabResult<(Lab, Vec<LabImage>)>;

    /// Overwrites the row and replaces every image in one transaction.
    async fn save_lab(&self, lab: Lab, images: Vec<String>) -> LabResult<(Lab, Vec<LabImage>)>;

    async fn delete_lab(&self, id: i64) -> LabResult<()>;
}

#[automock]
#[async_trait]
pub trait JadwalRepository: Send + Sync {
    async fn list_jadwals(
        &self,
        page: Page,
        lab_name: Option<String>,
    ) -> LabResult<(Vec<Jadwal>, i64)>;

    async fn get_jadwal_by_id(&self, id: i64) -> LabResult<Option<Jadwal>>;

    async fn get_berita_acara_images(&self, jadwal_id: i64) -> LabResult<Vec<BeritaAcaraImage>>;

    async fn create_jadwal(
        &self,
        jadwal: NewJadwal,
        images: Vec<String>,
    ) -> LabResult<(Jadwal, Vec<BeritaAcaraImage>)>;

    async fn save_jadwal(
        &self,
        jadwal: Jadwal,
        images: Vec<String>,
    ) -> LabResult<(Jadwal, Vec<BeritaAcaraImage>)>;

    async fn delete_jadwal(&self, id: i64) -> LabResult<()>;
}

#[automock]
#[async_trait]
pub trait PeminjamanRepository: Send + Sync {
    async fn list_peminjamans(&self, filter: PeminjamanFilter)
    -> LabResult<(Vec<Peminjaman>, i64)>;

    /// Rows owned by someone else are invisible to a `Viewer::User`.
    async fn get_peminjaman_by_id(&self, id: i64, viewer: Viewer)
    -> LabResult<Option<Peminjaman>>;

    async fn get_surat_rekomendasi_images(
        &self,
        peminjaman_id: i64,
    ) -> LabResult<Vec<SuratRekomendasiImage>>;

    async fn create_peminjaman(
        &self,
        peminjaman: NewPeminjaman,
        images: Vec<String>,
    ) -> LabResult<(Peminjaman, Vec<SuratRekomendasiImage>)>;

    /// Overwrites the booking, replaces its images and, when given, inserts the
    /// status notification, all inside one transaction. Nothing is written unless
    /// the stored status still equals `previous`.
    async fn save_peminjaman(
        &self,
        peminjaman: Peminjaman,
        previous: PeminjamanStatus,
        images: Vec<String>,
        notification: Option<NewNotification>,
    ) -> LabResult<(Peminjaman, Vec<SuratRekomendasiImage>)>;

    async fn delete_peminjaman(&self, id: i64) -> LabResult<()>;
}

#[automock]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Newest first.
    async fn list_notifications_by_user(&self, user_id: i64) -> LabResult<Vec<Notification>>;
}

#[automock]
#[async_trait]
pub trait TemplateMessageRepository: Send + Sync {
    async fn list_template_messages(&self) -> LabResult<Vec<TemplateMessage>>;

    async fn get_template_message_by_id(&self, id: i64) -> LabResult<Option<TemplateMessage>>;

    async fn create_template_message(
        &self,
        template: NewTemplateMessage,
    ) -> LabResult<TemplateMessage>;

    async fn save_template_message(&self, template: TemplateMessage)
    -> LabResult<TemplateMessage>;
}

#[automock]
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn list_history_searches(
        &self,
        user_id: i64,
        page: Page,
    ) -> LabResult<(Vec<HistorySearch>, i64)>;

    async fn get_history_search_by_id(&self, id: i64) -> LabResult<Option<HistorySearch>>;

    async fn create_history_search(&self, user_id: i64, name: String)
    -> LabResult<HistorySearch>;

    async fn delete_history_search(&self, id: i64) -> LabResult<()>;

    /// Most recently viewed first, each entry joined with its lab.
    async fn list_history_seen_labs(
        &self,
        user_id: i64,
        page: Page,
    ) -> LabResult<(Vec<(HistorySeenLab, Lab)>, i64)>;

    /// Inserts the (user, lab) row or bumps its `updated_at`.
    async fn record_seen_lab(&self, user_id: i64, lab_id: i64) -> LabResult<HistorySeenLab>;
}

#[automock]
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn totals(&self, today: NaiveDate) -> LabResult<DashboardTotals>;

    async fn recent_peminjamans(&self, limit: i64) -> LabResult<Vec<RecentPeminjaman>>;

    async fn recent_jadwals(&self, limit: i64) -> LabResult<Vec<Jadwal>>;

    async fn recent_users(&self, limit: i64) -> LabResult<Vec<User>>;

    async fn most_active_borrowers(&self, limit: i64) -> LabResult<Vec<UserTeraktifMeminjam>>;

    async fn monthly_totals(&self, month: u32, year: i32) -> LabResult<MonthlyTotals>;

    async fn peminjaman_per_lab(&self, month: u32, year: i32) -> LabResult<Vec<LabCount>>;

    async fn jadwal_per_lab(&self, month: u32, year: i32) -> LabResult<Vec<LabCount>>;
}
