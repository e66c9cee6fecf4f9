use color_eyre::eyre::Result;
use dotenv::dotenv;
use labsched_api::{config::ApiConfig, init_tracing};
use labsched_core::auth::hash_password;
use labsched_db::{
    create_pool,
    schema::{initialize_database, seed_admin},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level);

    let db_pool = create_pool(&config.database_url, config.max_connections).await?;
    initialize_database(&db_pool).await?;

    if let Some(admin) = &config.admin {
        let password_hash = hash_password(&admin.password)?;
        if !seed_admin(&db_pool, &admin.full_name, &admin.email, &password_hash).await? {
            info!("Admin account {} already exists", admin.email);
        }
    }

    labsched_api::start_server(config, db_pool).await?;

    Ok(())
}
