use axum::http::{StatusCode, header};
use chrono::Days;
use serde_json::{Value, json};

use labsched_core::models::{
    NewNotification, Peminjaman, PeminjamanStatus, Role, SuratRekomendasiImage,
    TEMPLATE_PEMINJAMAN_ACCEPTED, Viewer, today,
};

use crate::test_utils::{TestContext, bearer, lab, peminjaman, user};

fn images(peminjaman_id: i64, urls: &[String]) -> Vec<SuratRekomendasiImage> {
    urls.iter()
        .enumerate()
        .map(|(i, url)| SuratRekomendasiImage {
            id: i as i64 + 1,
            peminjaman_id,
            image_url: url.clone(),
        })
        .collect()
}

#[tokio::test]
async fn test_admin_accepts_booking_and_notifies_owner() {
    let mut ctx = TestContext::new();
    ctx.peminjaman
        .expect_get_peminjaman_by_id()
        .withf(|id, viewer| *id == 5 && *viewer == Viewer::Admin)
        .times(1)
        .returning(|id, _| Ok(Some(peminjaman(id, 42, PeminjamanStatus::Request))));
    ctx.peminjaman
        .expect_save_peminjaman()
        .withf(|saved: &Peminjaman, previous, urls, notification: &Option<NewNotification>| {
            saved.status == PeminjamanStatus::Accept
                && *previous == PeminjamanStatus::Request
                && urls == &vec!["https://img/surat.png".to_string()]
                && notification.as_ref().is_some_and(|n| {
                    n.user_id == 42
                        && n.template_id == TEMPLATE_PEMINJAMAN_ACCEPTED
                        && n.peminjaman_id == Some(5)
                })
        })
        .times(1)
        .returning(|saved, _, urls, _| {
            let id = saved.id;
            Ok((saved, images(id, &urls)))
        });
    ctx.labs
        .expect_get_lab_by_id()
        .returning(|id| Ok(Some(lab(id))));
    ctx.users
        .expect_get_user_by_id()
        .returning(|id| Ok(Some(user(id, Role::User))));
    let server = ctx.server();

    let response = server
        .put("/api/v1/admin/peminjaman/5")
        .add_header(header::AUTHORIZATION, bearer(1, Role::Admin))
        .json(&json!({
            "jam_peminjaman": "09:00",
            "description": "disetujui kaprodi",
            "status": "accept",
            "suratrekomendasi_image": [{ "image_url": "https://img/surat.png" }],
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let data = &response.json::<Value>()["data"];
    assert_eq!(data["peminjaman_id"], 5);
    assert_eq!(data["status"], "accept");
    assert_eq!(data["user"]["user_id"], 42);
}

#[tokio::test]
async fn test_resolved_booking_cannot_be_reviewed_again() {
    let mut ctx = TestContext::new();
    ctx.peminjaman
        .expect_get_peminjaman_by_id()
        .returning(|id, _| Ok(Some(peminjaman(id, 42, PeminjamanStatus::Reject))));
    ctx.peminjaman.expect_save_peminjaman().never();
    let server = ctx.server();

    let response = server
        .put("/api/v1/admin/peminjaman/5")
        .add_header(header::AUTHORIZATION, bearer(1, Role::Admin))
        .json(&json!({
            "jam_peminjaman": "09:00",
            "description": "coba lagi",
            "status": "accept",
            "suratrekomendasi_image": [{ "image_url": "https://img/surat.png" }],
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_cannot_book_in_the_past() {
    let mut ctx = TestContext::new();
    ctx.peminjaman.expect_create_peminjaman().never();
    let server = ctx.server();
    let yesterday = today().checked_sub_days(Days::new(1)).unwrap();

    let response = server
        .post("/api/v1/user/peminjaman")
        .add_header(header::AUTHORIZATION, bearer(42, Role::User))
        .json(&json!({
            "lab_id": 1,
            "tanggal_peminjaman": yesterday.format("%Y-%m-%d").to_string(),
            "jam_peminjaman": "12:00",
            "description": "praktikum",
            "suratrekomendasi_image": [{ "image_url": "https://img/surat.png" }],
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let errors = response.json::<Value>()["errors"].as_str().unwrap().to_string();
    assert!(errors.contains("before today"));
}

#[tokio::test]
async fn test_user_booking_is_created_as_request() {
    let mut ctx = TestContext::new();
    ctx.labs
        .expect_get_lab_by_id()
        .returning(|id| Ok(Some(lab(id))));
    ctx.users
        .expect_get_user_by_id()
        .returning(|id| Ok(Some(user(id, Role::User))));
    ctx.peminjaman
        .expect_create_peminjaman()
        .withf(|new, _| new.user_id == 42 && new.status == PeminjamanStatus::Request)
        .times(1)
        .returning(|new, urls| {
            let mut saved = peminjaman(8, new.user_id, new.status);
            saved.tanggal_peminjaman = new.tanggal_peminjaman;
            saved.jam_peminjaman = new.jam_peminjaman;
            Ok((saved, images(8, &urls)))
        });
    let server = ctx.server();
    let tomorrow = today().checked_add_days(Days::new(1)).unwrap();

    let response = server
        .post("/api/v1/user/peminjaman")
        .add_header(header::AUTHORIZATION, bearer(42, Role::User))
        .json(&json!({
            "lab_id": 1,
            "tanggal_peminjaman": tomorrow.format("%Y-%m-%d").to_string(),
            "jam_peminjaman": "12:00",
            "description": "praktikum",
            // Clients cannot pick the initial status.
            "status": "accept",
            "suratrekomendasi_image": [{ "image_url": "https://img/surat.png" }],
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let data = &response.json::<Value>()["data"];
    assert_eq!(data["status"], "request");
    assert_eq!(data["jam_peminjaman"], "12:00");
}

#[tokio::test]
async fn test_user_cannot_read_foreign_booking() {
    let mut ctx = TestContext::new();
    ctx.peminjaman
        .expect_get_peminjaman_by_id()
        .withf(|id, viewer| *id == 5 && *viewer == Viewer::User(42))
        .returning(|_, _| Ok(None));
    let server = ctx.server();

    let response = server
        .get("/api/v1/user/peminjaman/5")
        .add_header(header::AUTHORIZATION, bearer(42, Role::User))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_numeric_id_uses_error_envelope() {
    let mut ctx = TestContext::new();
    ctx.peminjaman.expect_get_peminjaman_by_id().never();
    let server = ctx.server();

    let response = server
        .get("/api/v1/admin/peminjaman/abc")
        .add_header(header::AUTHORIZATION, bearer(1, Role::Admin))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["status_code"], 400);
    assert_eq!(body["message"], "Bad Request");
    assert!(body["errors"].as_str().unwrap().starts_with("Validation error:"));
}
