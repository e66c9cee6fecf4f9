use async_trait::async_trait;
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};

use labsched_core::{
    errors::LabResult,
    models::{Lab, LabImage, NewLab},
    pagination::Page,
    repositories::LabRepository,
};

use crate::{
    models::{DbLab, DbLabImage},
    repositories::like_pattern,
};

pub async fn list_labs(
    pool: &Pool<Postgres>,
    page: Page,
    name: Option<String>,
) -> Result<(Vec<DbLab>, i64)> {
    let pattern = like_pattern(name);

    let labs = sqlx::query_as::<_, DbLab>(
        r#"
        SELECT id, name, description, created_at, updated_at
        FROM labs
        WHERE $1::TEXT IS NULL OR name ILIKE $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&pattern)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    let total =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM labs WHERE $1::TEXT IS NULL OR name ILIKE $1")
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

    tracing::debug!("Found {} labs (total {})", labs.len(), total);
    Ok((labs, total))
}

pub async fn get_lab_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbLab>> {
    let lab = sqlx::query_as::<_, DbLab>(
        "SELECT id, name, description, created_at, updated_at FROM labs WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(lab)
}

pub async fn get_lab_by_name(pool: &Pool<Postgres>, name: &str) -> Result<Option<DbLab>> {
    let lab = sqlx::query_as::<_, DbLab>(
        r#"
        SELECT id, name, description, created_at, updated_at
        FROM labs
        WHERE LOWER(name) = LOWER($1)
        ORDER BY id
        LIMIT 1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(lab)
}

pub async fn get_lab_images(pool: &Pool<Postgres>, lab_id: i64) -> Result<Vec<DbLabImage>> {
    let images = sqlx::query_as::<_, DbLabImage>(
        "SELECT id, lab_id, image_url FROM lab_images WHERE lab_id = $1 ORDER BY id",
    )
    .bind(lab_id)
    .fetch_all(pool)
    .await?;

    Ok(images)
}

/// Deletes every image of the lab and inserts `urls` in order.
pub async fn replace_lab_images(
    conn: &mut PgConnection,
    lab_id: i64,
    urls: &[String],
) -> Result<Vec<DbLabImage>> {
    sqlx::query("DELETE FROM lab_images WHERE lab_id = $1")
        .bind(lab_id)
        .execute(&mut *conn)
        .await?;

    let mut images = Vec::with_capacity(urls.len());
    for url in urls {
        let image = sqlx::query_as::<_, DbLabImage>(
            "INSERT INTO lab_images (lab_id, image_url) VALUES ($1, $2) RETURNING id, lab_id, image_url",
        )
        .bind(lab_id)
        .bind(url)
        .fetch_one(&mut *conn)
        .await?;
        images.push(image);
    }

    Ok(images)
}

pub async fn create_lab(
    pool: &Pool<Postgres>,
    lab: &NewLab,
    urls: &[String],
) -> Result<(DbLab, Vec<DbLabImage>)> {
    let mut tx = pool.begin().await?;

    let created = sqlx::query_as::<_, DbLab>(
        r#"
        INSERT INTO labs (name, description)
        VALUES ($1, $2)
        RETURNING id, name, description, created_at, updated_at
        "#,
    )
    .bind(&lab.name)
    .bind(&lab.description)
    .fetch_one(&mut *tx)
    .await?;
    let images = replace_lab_images(&mut *tx, created.id, urls).await?;

    tx.commit().await?;
    tracing::debug!("Lab created: id={}, images={}", created.id, images.len());
    Ok((created, images))
}

pub async fn save_lab(
    pool: &Pool<Postgres>,
    lab: &Lab,
    urls: &[String],
) -> Result<(DbLab, Vec<DbLabImage>)> {
    let mut tx = pool.begin().await?;

    let saved = sqlx::query_as::<_, DbLab>(
        r#"
        UPDATE labs
        SET name = $2, description = $3, updated_at = NOW()
        WHERE id = $1
        RETURNING id, name, description, created_at, updated_at
        "#,
    )
    .bind(lab.id)
    .bind(&lab.name)
    .bind(&lab.description)
    .fetch_one(&mut *tx)
    .await?;
    let images = replace_lab_images(&mut *tx, saved.id, urls).await?;

    tx.commit().await?;
    Ok((saved, images))
}

pub async fn delete_lab(pool: &Pool<Postgres>, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM labs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub struct PgLabRepository {
    pool: Pool<Postgres>,
}

impl PgLabRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn into_lab(row: (DbLab, Vec<DbLabImage>)) -> (Lab, Vec<LabImage>) {
    let (lab, images) = row;
    (lab.into(), images.into_iter().map(Into::into).collect())
}

#[async_trait]
impl LabRepository for PgLabRepository {
    async fn list_labs(&self, page: Page, name: Option<String>) -> LabResult<(Vec<Lab>, i64)> {
        let (labs, total) = list_labs(&self.pool, page, name).await?;
        Ok((labs.into_iter().map(Into::into).collect(), total))
    }

    async fn get_lab_by_id(&self, id: i64) -> LabResult<Option<Lab>> {
        Ok(get_lab_by_id(&self.pool, id).await?.map(Into::into))
    }

    async fn get_lab_by_name(&self, name: String) -> LabResult<Option<Lab>> {
        Ok(get_lab_by_name(&self.pool, &name).await?.map(Into::into))
    }

    async fn get_lab_images(&self, lab_id: i64) -> LabResult<Vec<LabImage>> {
        let images = get_lab_images(&self.pool, lab_id).await?;
        Ok(images.into_iter().map(Into::into).collect())
    }

    async fn create_lab(
        &self,
        lab: NewLab,
        images: Vec<String>,
    ) -> LabResult<(Lab, Vec<LabImage>)> {
        Ok(into_lab(create_lab(&self.pool, &lab, &images).await?))
    }

    async fn save_lab(&self, lab: Lab, images: Vec<String>) -> LabResult<(Lab, Vec<LabImage>)> {
        Ok(into_lab(save_lab(&self.pool, &lab, &images).await?))
    }

    async fn delete_lab(&self, id: i64) -> LabResult<()> {
        Ok(delete_lab(&self.pool, id).await?)
    }
}
