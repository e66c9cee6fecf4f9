use async_trait::async_trait;
use eyre::Result;
use sqlx::{Pool, Postgres};

use labsched_core::{
    errors::LabResult,
    models::{NewUser, User},
    pagination::Page,
    repositories::UserRepository,
};

use crate::{models::DbUser, repositories::like_pattern};

const USER_COLUMNS: &str = "id, full_name, email, password_hash, nim_nip, profile_picture, role, created_at, updated_at, deleted_at";

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbUser>> {
    tracing::debug!("Getting user by id: {}", id);

    let user = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn create_user(pool: &Pool<Postgres>, user: &NewUser) -> Result<DbUser> {
    tracing::debug!("Creating user: email={}", user.email);

    let user = sqlx::query_as::<_, DbUser>(&format!(
        r#"
        INSERT INTO users (full_name, email, password_hash, nim_nip, profile_picture, role)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(&user.full_name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.nim_nip)
    .bind(&user.profile_picture)
    .bind(user.role.as_str())
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn save_user(pool: &Pool<Postgres>, user: &User) -> Result<DbUser> {
    let user = sqlx::query_as::<_, DbUser>(&format!(
        r#"
        UPDATE users
        SET full_name = $2, email = $3, password_hash = $4, nim_nip = $5,
            profile_picture = $6, role = $7, updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(user.id)
    .bind(&user.full_name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.nim_nip)
    .bind(&user.profile_picture)
    .bind(user.role.as_str())
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn soft_delete_user(pool: &Pool<Postgres>, id: i64) -> Result<()> {
    sqlx::query("UPDATE users SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn list_users(
    pool: &Pool<Postgres>,
    page: Page,
    search: Option<String>,
    include_deleted: bool,
) -> Result<(Vec<DbUser>, i64)> {
    let pattern = like_pattern(search);
    let filter = "($1::TEXT IS NULL OR full_name ILIKE $1 OR email ILIKE $1) AND ($2 OR deleted_at IS NULL)";

    let users = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {} FROM users WHERE {} ORDER BY created_at DESC, id DESC LIMIT $3 OFFSET $4",
        USER_COLUMNS, filter
    ))
    .bind(&pattern)
    .bind(include_deleted)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM users WHERE {}", filter))
        .bind(&pattern)
        .bind(include_deleted)
        .fetch_one(pool)
        .await?;

    Ok((users, total))
}

pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_user_by_id(&self, id: i64) -> LabResult<Option<User>> {
        get_user_by_id(&self.pool, id)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn get_user_by_email(&self, email: String) -> LabResult<Option<User>> {
        get_user_by_email(&self.pool, &email)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn create_user(&self, user: NewUser) -> LabResult<User> {
        create_user(&self.pool, &user).await?.try_into()
    }

    async fn save_user(&self, user: User) -> LabResult<User> {
        save_user(&self.pool, &user).await?.try_into()
    }

    async fn soft_delete_user(&self, id: i64) -> LabResult<()> {
        Ok(soft_delete_user(&self.pool, id).await?)
    }

    async fn list_users(
        &self,
        page: Page,
        search: Option<String>,
        include_deleted: bool,
    ) -> LabResult<(Vec<User>, i64)> {
        let (rows, total) = list_users(&self.pool, page, search, include_deleted).await?;
        let users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<LabResult<Vec<_>>>()?;
        Ok((users, total))
    }
}
