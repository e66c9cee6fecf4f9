//! Aggregate queries behind the admin dashboard. Monthly filters match on the
//! `created_at` month and year.

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};

use labsched_core::{
    errors::LabResult,
    models::{
        DashboardTotals, Jadwal, LabCount, MonthlyTotals, RecentPeminjaman, User,
        UserTeraktifMeminjam,
    },
    repositories::DashboardRepository,
};

use crate::models::{DbBorrowerCount, DbJadwal, DbLabCount, DbRecentPeminjaman, DbUser};

const ACTIVE_USERS: &str = "role = 'user' AND deleted_at IS NULL";
const IN_MONTH: &str =
    "EXTRACT(MONTH FROM created_at)::INT = $1 AND EXTRACT(YEAR FROM created_at)::INT = $2";

async fn count(pool: &Pool<Postgres>, sql: &str) -> Result<i64> {
    Ok(sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await?)
}

async fn count_on(pool: &Pool<Postgres>, sql: &str, day: NaiveDate) -> Result<i64> {
    Ok(sqlx::query_scalar::<_, i64>(sql)
        .bind(day)
        .fetch_one(pool)
        .await?)
}

async fn count_in_month(pool: &Pool<Postgres>, sql: &str, month: u32, year: i32) -> Result<i64> {
    Ok(sqlx::query_scalar::<_, i64>(sql)
        .bind(month as i32)
        .bind(year)
        .fetch_one(pool)
        .await?)
}

pub async fn totals(pool: &Pool<Postgres>, today: NaiveDate) -> Result<DashboardTotals> {
    let totals = DashboardTotals {
        users: count(pool, &format!("SELECT COUNT(*) FROM users WHERE {}", ACTIVE_USERS)).await?,
        users_today: count_on(
            pool,
            &format!(
                "SELECT COUNT(*) FROM users WHERE {} AND created_at::date = $1",
                ACTIVE_USERS
            ),
            today,
        )
        .await?,
        labs: count(pool, "SELECT COUNT(*) FROM labs").await?,
        peminjaman: count(pool, "SELECT COUNT(*) FROM peminjaman").await?,
        peminjaman_today: count_on(
            pool,
            "SELECT COUNT(*) FROM peminjaman WHERE created_at::date = $1",
            today,
        )
        .await?,
        jadwal: count(pool, "SELECT COUNT(*) FROM jadwal").await?,
        jadwal_today: count_on(
            pool,
            "SELECT COUNT(*) FROM jadwal WHERE created_at::date = $1",
            today,
        )
        .await?,
    };

    tracing::debug!("Dashboard totals: {:?}", totals);
    Ok(totals)
}

pub async fn recent_peminjamans(
    pool: &Pool<Postgres>,
    limit: i64,
) -> Result<Vec<DbRecentPeminjaman>> {
    let rows = sqlx::query_as::<_, DbRecentPeminjaman>(
        r#"
        SELECT p.id, l.name AS lab_name, p.created_at, p.updated_at
        FROM peminjaman p
        JOIN labs l ON l.id = p.lab_id
        ORDER BY p.created_at DESC, p.id DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn recent_jadwals(pool: &Pool<Postgres>, limit: i64) -> Result<Vec<DbJadwal>> {
    let rows = sqlx::query_as::<_, DbJadwal>(
        r#"
        SELECT id, tanggal_jadwal, waktu_jadwal, name_user, name_laboratorium, status,
               created_at, updated_at
        FROM jadwal
        ORDER BY created_at DESC, id DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn recent_users(pool: &Pool<Postgres>, limit: i64) -> Result<Vec<DbUser>> {
    let rows = sqlx::query_as::<_, DbUser>(&format!(
        r#"
        SELECT id, full_name, email, password_hash, nim_nip, profile_picture, role,
               created_at, updated_at, deleted_at
        FROM users
        WHERE {}
        ORDER BY created_at DESC, id DESC
        LIMIT $1
        "#,
        ACTIVE_USERS
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn most_active_borrowers(
    pool: &Pool<Postgres>,
    limit: i64,
) -> Result<Vec<DbBorrowerCount>> {
    let rows = sqlx::query_as::<_, DbBorrowerCount>(
        r#"
        SELECT u.full_name, COUNT(p.id) AS jumlah_peminjaman
        FROM users u
        JOIN peminjaman p ON p.user_id = u.id
        WHERE u.deleted_at IS NULL
        GROUP BY u.id, u.full_name
        ORDER BY jumlah_peminjaman DESC, u.full_name
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn monthly_totals(pool: &Pool<Postgres>, month: u32, year: i32) -> Result<MonthlyTotals> {
    Ok(MonthlyTotals {
        users: count_in_month(
            pool,
            &format!("SELECT COUNT(*) FROM users WHERE {} AND {}", ACTIVE_USERS, IN_MONTH),
            month,
            year,
        )
        .await?,
        labs: count(pool, "SELECT COUNT(*) FROM labs").await?,
        peminjaman: count_in_month(
            pool,
            &format!("SELECT COUNT(*) FROM peminjaman WHERE {}", IN_MONTH),
            month,
            year,
        )
        .await?,
        jadwal: count_in_month(
            pool,
            &format!("SELECT COUNT(*) FROM jadwal WHERE {}", IN_MONTH),
            month,
            year,
        )
        .await?,
    })
}

/// Every lab appears, with zero when it had no bookings that month.
pub async fn peminjaman_per_lab(
    pool: &Pool<Postgres>,
    month: u32,
    year: i32,
) -> Result<Vec<DbLabCount>> {
    let rows = sqlx::query_as::<_, DbLabCount>(
        r#"
        SELECT l.name, COUNT(p.id) AS total
        FROM labs l
        LEFT JOIN peminjaman p
            ON p.lab_id = l.id
            AND EXTRACT(MONTH FROM p.created_at)::INT = $1
            AND EXTRACT(YEAR FROM p.created_at)::INT = $2
        GROUP BY l.id, l.name
        ORDER BY l.id
        "#,
    )
    .bind(month as i32)
    .bind(year)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn jadwal_per_lab(
    pool: &Pool<Postgres>,
    month: u32,
    year: i32,
) -> Result<Vec<DbLabCount>> {
    let rows = sqlx::query_as::<_, DbLabCount>(&format!(
        r#"
        SELECT name_laboratorium AS name, COUNT(*) AS total
        FROM jadwal
        WHERE {}
        GROUP BY name_laboratorium
        ORDER BY name_laboratorium
        "#,
        IN_MONTH
    ))
    .bind(month as i32)
    .bind(year)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub struct PgDashboardRepository {
    pool: Pool<Postgres>,
}

impl PgDashboardRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardRepository for PgDashboardRepository {
    async fn totals(&self, today: NaiveDate) -> LabResult<DashboardTotals> {
        Ok(totals(&self.pool, today).await?)
    }

    async fn recent_peminjamans(&self, limit: i64) -> LabResult<Vec<RecentPeminjaman>> {
        let rows = recent_peminjamans(&self.pool, limit).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn recent_jadwals(&self, limit: i64) -> LabResult<Vec<Jadwal>> {
        recent_jadwals(&self.pool, limit)
            .await?
            .into_iter()
            .map(Jadwal::try_from)
            .collect()
    }

    async fn recent_users(&self, limit: i64) -> LabResult<Vec<User>> {
        recent_users(&self.pool, limit)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn most_active_borrowers(&self, limit: i64) -> LabResult<Vec<UserTeraktifMeminjam>> {
        let rows = most_active_borrowers(&self.pool, limit).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn monthly_totals(&self, month: u32, year: i32) -> LabResult<MonthlyTotals> {
        Ok(monthly_totals(&self.pool, month, year).await?)
    }

    async fn peminjaman_per_lab(&self, month: u32, year: i32) -> LabResult<Vec<LabCount>> {
        let rows = peminjaman_per_lab(&self.pool, month, year).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn jadwal_per_lab(&self, month: u32, year: i32) -> LabResult<Vec<LabCount>> {
        let rows = jadwal_per_lab(&self.pool, month, year).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
