#![allow(dead_code)]

use std::sync::Arc;

use axum::http::HeaderValue;
use axum_test::TestServer;
use chrono::{DateTime, Days, TimeZone, Utc};

use labsched_api::{ApiState, Repositories, create_router, middleware::auth::JwtConfig};
use labsched_core::{
    models::{Lab, Peminjaman, PeminjamanStatus, Role, TimeSlot, User, today},
    repositories::{
        MockDashboardRepository, MockHistoryRepository, MockJadwalRepository, MockLabRepository,
        MockNotificationRepository, MockPeminjamanRepository, MockTemplateMessageRepository,
        MockUserRepository,
    },
};

pub const SECRET: &str = "test-secret";

/// One mock per repository. Set expectations, then call [`TestContext::server`].
pub struct TestContext {
    pub users: MockUserRepository,
    pub labs: MockLabRepository,
    pub jadwals: MockJadwalRepository,
    pub peminjaman: MockPeminjamanRepository,
    pub notifications: MockNotificationRepository,
    pub templates: MockTemplateMessageRepository,
    pub history: MockHistoryRepository,
    pub dashboard: MockDashboardRepository,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            users: MockUserRepository::new(),
            labs: MockLabRepository::new(),
            jadwals: MockJadwalRepository::new(),
            peminjaman: MockPeminjamanRepository::new(),
            notifications: MockNotificationRepository::new(),
            templates: MockTemplateMessageRepository::new(),
            history: MockHistoryRepository::new(),
            dashboard: MockDashboardRepository::new(),
        }
    }

    pub fn server(self) -> TestServer {
        let repos = Repositories {
            users: Arc::new(self.users),
            labs: Arc::new(self.labs),
            jadwals: Arc::new(self.jadwals),
            peminjaman: Arc::new(self.peminjaman),
            notifications: Arc::new(self.notifications),
            templates: Arc::new(self.templates),
            history: Arc::new(self.history),
            dashboard: Arc::new(self.dashboard),
        };
        let state = Arc::new(ApiState::new(repos, jwt(), false));

        TestServer::new(create_router(state)).unwrap()
    }
}

pub fn jwt() -> JwtConfig {
    JwtConfig::new(SECRET, 1)
}

pub fn bearer(user_id: i64, role: Role) -> HeaderValue {
    let token = jwt().issue(user_id, role).unwrap();
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

pub fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap()
}

pub fn user(id: i64, role: Role) -> User {
    User {
        id,
        full_name: "Rina Marlina".to_string(),
        email: format!("user{}@kampus.ac.id", id),
        password_hash: labsched_core::auth::hash_password("rahasia123").unwrap(),
        nim_nip: "130120001".to_string(),
        profile_picture: "https://img/p.png".to_string(),
        role,
        created_at: at(1),
        updated_at: at(1),
        deleted_at: None,
    }
}

pub fn lab(id: i64) -> Lab {
    Lab {
        id,
        name: format!("Laboratorium {}", id),
        description: "Gedung A lantai 2".to_string(),
        created_at: at(1),
        updated_at: at(1),
    }
}

pub fn peminjaman(id: i64, user_id: i64, status: PeminjamanStatus) -> Peminjaman {
    Peminjaman {
        id,
        user_id,
        lab_id: 1,
        tanggal_peminjaman: today().checked_add_days(Days::new(3)).unwrap(),
        jam_peminjaman: TimeSlot::Morning,
        description: "praktikum jaringan".to_string(),
        status,
        created_at: at(2),
        updated_at: at(2),
    }
}
