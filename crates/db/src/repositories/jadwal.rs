use async_trait::async_trait;
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};

use labsched_core::{
    errors::LabResult,
    models::{BeritaAcaraImage, Jadwal, NewJadwal},
    pagination::Page,
    repositories::JadwalRepository,
};

use crate::{
    models::{DbBeritaAcaraImage, DbJadwal},
    repositories::like_pattern,
};

const JADWAL_COLUMNS: &str =
    "id, tanggal_jadwal, waktu_jadwal, name_user, name_laboratorium, status, created_at, updated_at";

pub async fn list_jadwals(
    pool: &Pool<Postgres>,
    page: Page,
    lab_name: Option<String>,
) -> Result<(Vec<DbJadwal>, i64)> {
    let pattern = like_pattern(lab_name);
    let filter = "$1::TEXT IS NULL OR name_laboratorium ILIKE $1";

    let jadwals = sqlx::query_as::<_, DbJadwal>(&format!(
        "SELECT {} FROM jadwal WHERE {} ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        JADWAL_COLUMNS, filter
    ))
    .bind(&pattern)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM jadwal WHERE {}", filter))
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

    Ok((jadwals, total))
}

pub async fn get_jadwal_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbJadwal>> {
    tracing::debug!("Getting jadwal by id: {}", id);

    let jadwal = sqlx::query_as::<_, DbJadwal>(&format!(
        "SELECT {} FROM jadwal WHERE id = $1",
        JADWAL_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(jadwal)
}

pub async fn get_berita_acara_images(
    pool: &Pool<Postgres>,
    jadwal_id: i64,
) -> Result<Vec<DbBeritaAcaraImage>> {
    let images = sqlx::query_as::<_, DbBeritaAcaraImage>(
        "SELECT id, jadwal_id, image_url FROM berita_acara_images WHERE jadwal_id = $1 ORDER BY id",
    )
    .bind(jadwal_id)
    .fetch_all(pool)
    .await?;

    Ok(images)
}

pub async fn replace_berita_acara_images(
    conn: &mut PgConnection,
    jadwal_id: i64,
    urls: &[String],
) -> Result<Vec<DbBeritaAcaraImage>> {
    sqlx::query("DELETE FROM berita_acara_images WHERE jadwal_id = $1")
        .bind(jadwal_id)
        .execute(&mut *conn)
        .await?;

    let mut images = Vec::with_capacity(urls.len());
    for url in urls {
        let image = sqlx::query_as::<_, DbBeritaAcaraImage>(
            r#"
            INSERT INTO berita_acara_images (jadwal_id, image_url)
            VALUES ($1, $2)
            RETURNING id, jadwal_id, image_url
            "#,
        )
        .bind(jadwal_id)
        .bind(url)
        .fetch_one(&mut *conn)
        .await?;
        images.push(image);
    }

    Ok(images)
}

pub async fn create_jadwal(
    pool: &Pool<Postgres>,
    jadwal: &NewJadwal,
    urls: &[String],
) -> Result<(DbJadwal, Vec<DbBeritaAcaraImage>)> {
    let mut tx = pool.begin().await?;

    let created = sqlx::query_as::<_, DbJadwal>(&format!(
        r#"
        INSERT INTO jadwal (tanggal_jadwal, waktu_jadwal, name_user, name_laboratorium, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {}
        "#,
        JADWAL_COLUMNS
    ))
    .bind(jadwal.tanggal_jadwal)
    .bind(jadwal.waktu_jadwal.as_str())
    .bind(&jadwal.name_user)
    .bind(&jadwal.name_laboratorium)
    .bind(jadwal.status.as_str())
    .fetch_one(&mut *tx)
    .await?;
    let images = replace_berita_acara_images(&mut *tx, created.id, urls).await?;

    tx.commit().await?;
    tracing::debug!("Jadwal created: id={}", created.id);
    Ok((created, images))
}

pub async fn save_jadwal(
    pool: &Pool<Postgres>,
    jadwal: &Jadwal,
    urls: &[String],
) -> Result<(DbJadwal, Vec<DbBeritaAcaraImage>)> {
    let mut tx = pool.begin().await?;

    let saved = sqlx::query_as::<_, DbJadwal>(&format!(
        r#"
        UPDATE jadwal
        SET tanggal_jadwal = $2, waktu_jadwal = $3, name_user = $4,
            name_laboratorium = $5, status = $6, updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        JADWAL_COLUMNS
    ))
    .bind(jadwal.id)
    .bind(jadwal.tanggal_jadwal)
    .bind(jadwal.waktu_jadwal.as_str())
    .bind(&jadwal.name_user)
    .bind(&jadwal.name_laboratorium)
    .bind(jadwal.status.as_str())
    .fetch_one(&mut *tx)
    .await?;
    let images = replace_berita_acara_images(&mut *tx, saved.id, urls).await?;

    tx.commit().await?;
    Ok((saved, images))
}

pub async fn delete_jadwal(pool: &Pool<Postgres>, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM jadwal WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub struct PgJadwalRepository {
    pool: Pool<Postgres>,
}

impl PgJadwalRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn into_jadwal(
    row: (DbJadwal, Vec<DbBeritaAcaraImage>),
) -> LabResult<(Jadwal, Vec<BeritaAcaraImage>)> {
    let (jadwal, images) = row;
    Ok((
        jadwal.try_into()?,
        images.into_iter().map(Into::into).collect(),
    ))
}

#[async_trait]
impl JadwalRepository for PgJadwalRepository {
    async fn list_jadwals(
        &self,
        page: Page,
        lab_name: Option<String>,
    ) -> LabResult<(Vec<Jadwal>, i64)> {
        let (rows, total) = list_jadwals(&self.pool, page, lab_name).await?;
        let jadwals = rows
            .into_iter()
            .map(Jadwal::try_from)
            .collect::<LabResult<Vec<_>>>()?;
        Ok((jadwals, total))
    }

    async fn get_jadwal_by_id(&self, id: i64) -> LabResult<Option<Jadwal>> {
        get_jadwal_by_id(&self.pool, id)
            .await?
            .map(Jadwal::try_from)
            .transpose()
    }

    async fn get_berita_acara_images(&self, jadwal_id: i64) -> LabResult<Vec<BeritaAcaraImage>> {
        let images = get_berita_acara_images(&self.pool, jadwal_id).await?;
        Ok(images.into_iter().map(Into::into).collect())
    }

    async fn create_jadwal(
        &self,
        jadwal: NewJadwal,
        images: Vec<String>,
    ) -> LabResult<(Jadwal, Vec<BeritaAcaraImage>)> {
        into_jadwal(create_jadwal(&self.pool, &jadwal, &images).await?)
    }

    async fn save_jadwal(
        &self,
        jadwal: Jadwal,
        images: Vec<String>,
    ) -> LabResult<(Jadwal, Vec<BeritaAcaraImage>)> {
        into_jadwal(save_jadwal(&self.pool, &jadwal, &images).await?)
    }

    async fn delete_jadwal(&self, id: i64) -> LabResult<()> {
        Ok(delete_jadwal(&self.pool, id).await?)
    }
}
