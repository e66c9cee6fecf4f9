//! # Labsched API
//!
//! HTTP layer of the laboratory reservation service. Every route lives under
//! `/api/v1` and falls into one of three groups: public, `user` token and
//! `admin` token.
//!
//! ## Architecture
//!
//! - **Routes**: URL structure and role guards per group
//! - **Handlers**: bind requests to the core services and wrap results in the response envelope
//! - **Middleware**: JWT verification and error to HTTP mapping
//! - **Config**: environment configuration

/// Configuration module for API settings
pub mod config;
/// Extractors that reject with the error envelope
pub mod extract;
/// Request handlers, one module per resource
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Success envelopes
pub mod response;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use labsched_core::{
    repositories::{
        DashboardRepository, HistoryRepository, JadwalRepository, LabRepository,
        NotificationRepository, PeminjamanRepository, TemplateMessageRepository, UserRepository,
    },
    services::{
        DashboardService, HistoryService, JadwalService, LabService, NotificationService,
        PeminjamanService, TemplateMessageService, UserService,
    },
};
use labsched_db::{
    DbPool, PgDashboardRepository, PgHistoryRepository, PgJadwalRepository, PgLabRepository,
    PgNotificationRepository, PgPeminjamanRepository, PgTemplateMessageRepository,
    PgUserRepository,
};

use crate::middleware::auth::JwtConfig;

/// One handle per persistence seam. Services are assembled from these.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub labs: Arc<dyn LabRepository>,
    pub jadwals: Arc<dyn JadwalRepository>,
    pub peminjaman: Arc<dyn PeminjamanRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub templates: Arc<dyn TemplateMessageRepository>,
    pub history: Arc<dyn HistoryRepository>,
    pub dashboard: Arc<dyn DashboardRepository>,
}

impl Repositories {
    /// PostgreSQL repositories sharing a single pool.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            labs: Arc::new(PgLabRepository::new(pool.clone())),
            jadwals: Arc::new(PgJadwalRepository::new(pool.clone())),
            peminjaman: Arc::new(PgPeminjamanRepository::new(pool.clone())),
            notifications: Arc::new(PgNotificationRepository::new(pool.clone())),
            templates: Arc::new(PgTemplateMessageRepository::new(pool.clone())),
            history: Arc::new(PgHistoryRepository::new(pool.clone())),
            dashboard: Arc::new(PgDashboardRepository::new(pool)),
        }
    }
}

/// Shared application state handed to every handler.
pub struct ApiState {
    pub users: UserService,
    pub labs: LabService,
    pub jadwals: JadwalService,
    pub peminjaman: PeminjamanService,
    pub notifications: NotificationService,
    pub templates: TemplateMessageService,
    pub history: HistoryService,
    pub dashboard: DashboardService,
    pub jwt: JwtConfig,
}

impl ApiState {
    pub fn new(repos: Repositories, jwt: JwtConfig, verify_jadwal_lab_name: bool) -> Self {
        Self {
            users: UserService::new(repos.users.clone()),
            labs: LabService::new(repos.labs.clone(), repos.history.clone()),
            jadwals: JadwalService::new(
                repos.jadwals.clone(),
                repos.labs.clone(),
                repos.users.clone(),
            )
            .with_lab_name_verification(verify_jadwal_lab_name),
            peminjaman: PeminjamanService::new(
                repos.peminjaman.clone(),
                repos.labs.clone(),
                repos.users.clone(),
            ),
            notifications: NotificationService::new(
                repos.notifications,
                repos.templates.clone(),
                repos.users,
            ),
            templates: TemplateMessageService::new(repos.templates),
            history: HistoryService::new(repos.history),
            dashboard: DashboardService::new(repos.dashboard),
            jwt,
        }
    }
}

/// Builds the `/api/v1` router without transport layers.
pub fn create_router(state: Arc<ApiState>) -> Router {
    let api = Router::new()
        .merge(routes::health::routes())
        .merge(routes::public::routes())
        .merge(routes::user::routes(state.clone()))
        .merge(routes::admin::routes(state.clone()));

    Router::new().nest("/api/v1", api).with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Installs the global fmt subscriber. Returns `false` when one is already set.
pub fn init_tracing(level: Level) -> bool {
    FmtSubscriber::builder()
        .with_max_level(level)
        .try_init()
        .is_ok()
}

/// Starts the API server with the provided configuration and database pool.
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = labsched_api::config::ApiConfig::from_env()?;
/// let pool = labsched_db::create_pool(&config.database_url, config.max_connections).await?;
/// labsched_api::start_server(config, pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    init_tracing(config.log_level);

    let state = Arc::new(ApiState::new(
        Repositories::postgres(db_pool),
        JwtConfig::new(config.jwt_secret.clone(), config.jwt_expiration_hours),
        config.verify_jadwal_lab_name,
    ));

    let app = create_router(state);

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
