pub mod models;
pub mod repositories;
pub mod schema;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

pub use repositories::{
    PgDashboardRepository, PgHistoryRepository, PgJadwalRepository, PgLabRepository,
    PgNotificationRepository, PgPeminjamanRepository, PgTemplateMessageRepository,
    PgUserRepository,
};

pub type DbPool = Pool<Postgres>;

/// Builds the single pool shared by every repository.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!("Connected to database (max {} connections)", max_connections);
    Ok(pool)
}
