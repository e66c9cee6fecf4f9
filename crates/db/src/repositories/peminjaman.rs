use async_trait::async_trait;
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};

use labsched_core::{
    errors::{LabError, LabResult},
    models::{
        NewNotification, NewPeminjaman, Peminjaman, PeminjamanFilter, PeminjamanStatus,
        SuratRekomendasiImage, Viewer,
    },
    repositories::PeminjamanRepository,
};

use crate::{
    models::{DbPeminjaman, DbSuratRekomendasiImage},
    repositories::{like_pattern, notification::insert_notification},
};

const PEMINJAMAN_COLUMNS: &str = "p.id, p.user_id, p.lab_id, p.tanggal_peminjaman, p.jam_peminjaman, p.description, p.status, p.created_at, p.updated_at";

pub async fn list_peminjamans(
    pool: &Pool<Postgres>,
    filter: &PeminjamanFilter,
) -> Result<(Vec<DbPeminjaman>, i64)> {
    let owner = filter.viewer.owner_id();
    let pattern = like_pattern(filter.lab_name.clone());
    let status = filter.status.map(|s| s.as_str());
    let conditions = r#"
        ($1::BIGINT IS NULL OR p.user_id = $1)
        AND ($2::TEXT IS NULL OR l.name ILIKE $2)
        AND ($3::TEXT IS NULL OR p.status = $3)
    "#;

    let rows = sqlx::query_as::<_, DbPeminjaman>(&format!(
        r#"
        SELECT {}
        FROM peminjaman p
        JOIN labs l ON l.id = p.lab_id
        WHERE {}
        ORDER BY p.created_at DESC, p.id DESC
        LIMIT $4 OFFSET $5
        "#,
        PEMINJAMAN_COLUMNS, conditions
    ))
    .bind(owner)
    .bind(&pattern)
    .bind(status)
    .bind(filter.page.limit)
    .bind(filter.page.offset())
    .fetch_all(pool)
    .await?;

    let total = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM peminjaman p JOIN labs l ON l.id = p.lab_id WHERE {}",
        conditions
    ))
    .bind(owner)
    .bind(&pattern)
    .bind(status)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Found {} peminjaman (total {})", rows.len(), total);
    Ok((rows, total))
}

pub async fn get_peminjaman_by_id(
    pool: &Pool<Postgres>,
    id: i64,
    viewer: Viewer,
) -> Result<Option<DbPeminjaman>> {
    let row = sqlx::query_as::<_, DbPeminjaman>(&format!(
        "SELECT {} FROM peminjaman p WHERE p.id = $1 AND ($2::BIGINT IS NULL OR p.user_id = $2)",
        PEMINJAMAN_COLUMNS
    ))
    .bind(id)
    .bind(viewer.owner_id())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_surat_rekomendasi_images(
    pool: &Pool<Postgres>,
    peminjaman_id: i64,
) -> Result<Vec<DbSuratRekomendasiImage>> {
    let images = sqlx::query_as::<_, DbSuratRekomendasiImage>(
        r#"
        SELECT id, peminjaman_id, image_url
        FROM surat_rekomendasi_images
        WHERE peminjaman_id = $1
        ORDER BY id
        "#,
    )
    .bind(peminjaman_id)
    .fetch_all(pool)
    .await?;

    Ok(images)
}

pub async fn replace_surat_rekomendasi_images(
    conn: &mut PgConnection,
    peminjaman_id: i64,
    urls: &[String],
) -> Result<Vec<DbSuratRekomendasiImage>> {
    sqlx::query("DELETE FROM surat_rekomendasi_images WHERE peminjaman_id = $1")
        .bind(peminjaman_id)
        .execute(&mut *conn)
        .await?;

    let mut images = Vec::with_capacity(urls.len());
    for url in urls {
        let image = sqlx::query_as::<_, DbSuratRekomendasiImage>(
            r#"
            INSERT INTO surat_rekomendasi_images (peminjaman_id, image_url)
            VALUES ($1, $2)
            RETURNING id, peminjaman_id, image_url
            "#,
        )
        .bind(peminjaman_id)
        .bind(url)
        .fetch_one(&mut *conn)
        .await?;
        images.push(image);
    }

    Ok(images)
}

pub async fn create_peminjaman(
    pool: &Pool<Postgres>,
    peminjaman: &NewPeminjaman,
    urls: &[String],
) -> Result<(DbPeminjaman, Vec<DbSuratRekomendasiImage>)> {
    let mut tx = pool.begin().await?;

    let created = sqlx::query_as::<_, DbPeminjaman>(
        r#"
        INSERT INTO peminjaman AS p
            (user_id, lab_id, tanggal_peminjaman, jam_peminjaman, description, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING p.id, p.user_id, p.lab_id, p.tanggal_peminjaman, p.jam_peminjaman,
                  p.description, p.status, p.created_at, p.updated_at
        "#,
    )
    .bind(peminjaman.user_id)
    .bind(peminjaman.lab_id)
    .bind(peminjaman.tanggal_peminjaman)
    .bind(peminjaman.jam_peminjaman.as_str())
    .bind(&peminjaman.description)
    .bind(peminjaman.status.as_str())
    .fetch_one(&mut *tx)
    .await?;
    let images = replace_surat_rekomendasi_images(&mut *tx, created.id, urls).await?;

    tx.commit().await?;
    tracing::debug!("Peminjaman created: id={}", created.id);
    Ok((created, images))
}

/// Row overwrite, image replacement and the optional notification commit together.
/// Returns `None`, writing nothing, when the stored status is no longer `previous`.
pub async fn save_peminjaman(
    pool: &Pool<Postgres>,
    peminjaman: &Peminjaman,
    previous: PeminjamanStatus,
    urls: &[String],
    notification: Option<&NewNotification>,
) -> Result<Option<(DbPeminjaman, Vec<DbSuratRekomendasiImage>)>> {
    let mut tx = pool.begin().await?;

    let saved = sqlx::query_as::<_, DbPeminjaman>(
        r#"
        UPDATE peminjaman AS p
        SET lab_id = $2, tanggal_peminjaman = $3, jam_peminjaman = $4,
            description = $5, status = $6, updated_at = NOW()
        WHERE p.id = $1 AND p.status = $7
        RETURNING p.id, p.user_id, p.lab_id, p.tanggal_peminjaman, p.jam_peminjaman,
                  p.description, p.status, p.created_at, p.updated_at
        "#,
    )
    .bind(peminjaman.id)
    .bind(peminjaman.lab_id)
    .bind(peminjaman.tanggal_peminjaman)
    .bind(peminjaman.jam_peminjaman.as_str())
    .bind(&peminjaman.description)
    .bind(peminjaman.status.as_str())
    .bind(previous.as_str())
    .fetch_optional(&mut *tx)
    .await?;
    let Some(saved) = saved else {
        tx.rollback().await?;
        return Ok(None);
    };
    let images = replace_surat_rekomendasi_images(&mut *tx, saved.id, urls).await?;

    if let Some(notification) = notification {
        insert_notification(&mut *tx, notification).await?;
    }

    tx.commit().await?;
    Ok(Some((saved, images)))
}

pub async fn delete_peminjaman(pool: &Pool<Postgres>, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM peminjaman WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub struct PgPeminjamanRepository {
    pool: Pool<Postgres>,
}

impl PgPeminjamanRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn into_peminjaman(
    row: (DbPeminjaman, Vec<DbSuratRekomendasiImage>),
) -> LabResult<(Peminjaman, Vec<SuratRekomendasiImage>)> {
    let (peminjaman, images) = row;
    Ok((
        peminjaman.try_into()?,
        images.into_iter().map(Into::into).collect(),
    ))
}

#[async_trait]
impl PeminjamanRepository for PgPeminjamanRepository {
    async fn list_peminjamans(
        &self,
        filter: PeminjamanFilter,
    ) -> LabResult<(Vec<Peminjaman>, i64)> {
        let (rows, total) = list_peminjamans(&self.pool, &filter).await?;
        let items = rows
            .into_iter()
            .map(Peminjaman::try_from)
            .collect::<LabResult<Vec<_>>>()?;
        Ok((items, total))
    }

    async fn get_peminjaman_by_id(
        &self,
        id: i64,
        viewer: Viewer,
    ) -> LabResult<Option<Peminjaman>> {
        get_peminjaman_by_id(&self.pool, id, viewer)
            .await?
            .map(Peminjaman::try_from)
            .transpose()
    }

    async fn get_surat_rekomendasi_images(
        &self,
        peminjaman_id: i64,
    ) -> LabResult<Vec<SuratRekomendasiImage>> {
        let images = get_surat_rekomendasi_images(&self.pool, peminjaman_id).await?;
        Ok(images.into_iter().map(Into::into).collect())
    }

    async fn create_peminjaman(
        &self,
        peminjaman: NewPeminjaman,
        images: Vec<String>,
    ) -> LabResult<(Peminjaman, Vec<SuratRekomendasiImage>)> {
        into_peminjaman(create_peminjaman(&self.pool, &peminjaman, &images).await?)
    }

    async fn save_peminjaman(
        &self,
        peminjaman: Peminjaman,
        previous: PeminjamanStatus,
        images: Vec<String>,
        notification: Option<NewNotification>,
    ) -> LabResult<(Peminjaman, Vec<SuratRekomendasiImage>)> {
        let saved = save_peminjaman(
            &self.pool,
            &peminjaman,
            previous,
            &images,
            notification.as_ref(),
        )
        .await?
        .ok_or_else(|| {
            LabError::validation(format!(
                "peminjaman {} is no longer {}",
                peminjaman.id, previous
            ))
        })?;
        into_peminjaman(saved)
    }

    async fn delete_peminjaman(&self, id: i64) -> LabResult<()> {
        Ok(delete_peminjaman(&self.pool, id).await?)
    }
}
