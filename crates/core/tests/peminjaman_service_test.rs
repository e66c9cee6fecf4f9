mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;

use common::{days_from_today, lab, peminjaman, surat_images, user};
use labsched_core::{
    errors::LabError,
    models::{
        Peminjaman, PeminjamanInput, PeminjamanStatus, SuratRekomendasiImageInput, TimeSlot,
        Viewer,
    },
    pagination::ListQuery,
    repositories::{MockLabRepository, MockPeminjamanRepository, MockUserRepository},
    services::PeminjamanService,
};

fn service(
    peminjaman: MockPeminjamanRepository,
    labs: MockLabRepository,
    users: MockUserRepository,
) -> PeminjamanService {
    PeminjamanService::new(Arc::new(peminjaman), Arc::new(labs), Arc::new(users))
}

fn labs_found() -> MockLabRepository {
    let mut labs = MockLabRepository::new();
    labs.expect_get_lab_by_id()
        .returning(|id| Ok(Some(lab(id))));
    labs
}

fn users_found() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_get_user_by_id()
        .returning(|id| Ok(Some(user(id))));
    users
}

fn images(urls: &[&str]) -> Vec<SuratRekomendasiImageInput> {
    urls.iter()
        .map(|url| SuratRekomendasiImageInput {
            image_url: url.to_string(),
        })
        .collect()
}

fn create_input(date: String) -> PeminjamanInput {
    PeminjamanInput {
        lab_id: Some(1),
        tanggal_peminjaman: Some(date),
        jam_peminjaman: "09:00".to_string(),
        surat_rekomendasi_image: images(&["https://img/surat.png"]),
        description: "praktikum".to_string(),
        status: "accept".to_string(),
    }
}

fn review_input(status: &str) -> PeminjamanInput {
    PeminjamanInput {
        lab_id: None,
        tanggal_peminjaman: None,
        jam_peminjaman: "12:00".to_string(),
        surat_rekomendasi_image: images(&["https://img/surat-ttd.png"]),
        description: "disetujui kaprodi".to_string(),
        status: status.to_string(),
    }
}

#[tokio::test]
async fn test_create_forces_request_status() {
    let mut repo = MockPeminjamanRepository::new();
    repo.expect_create_peminjaman()
        .withf(|new, images| {
            new.status == PeminjamanStatus::Request
                && new.user_id == 9
                && new.lab_id == 1
                && images == &vec!["https://img/surat.png".to_string()]
        })
        .times(1)
        .returning(|new, urls| {
            let mut row = peminjaman(11, new.user_id, new.status);
            row.tanggal_peminjaman = new.tanggal_peminjaman;
            Ok((row, surat_images(11, &urls)))
        });

    let response = service(repo, labs_found(), users_found())
        .create_peminjaman(9, create_input(days_from_today(2).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status, PeminjamanStatus::Request);
    assert_eq!(response.peminjaman_id, 11);
    assert_eq!(response.lab.lab_id, 1);
    assert_eq!(response.user.map(|u| u.user_id), Some(9));
    assert_eq!(response.surat_rekomendasi_image.len(), 1);
}

#[tokio::test]
async fn test_create_accepts_today() {
    let mut repo = MockPeminjamanRepository::new();
    repo.expect_create_peminjaman()
        .times(1)
        .returning(|new, urls| Ok((peminjaman(12, new.user_id, new.status), surat_images(12, &urls))));

    let result = service(repo, labs_found(), users_found())
        .create_peminjaman(9, create_input(days_from_today(0).to_string()))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_dated_yesterday_is_rejected() {
    let mut repo = MockPeminjamanRepository::new();
    repo.expect_create_peminjaman().never();

    let err = service(repo, MockLabRepository::new(), MockUserRepository::new())
        .create_peminjaman(9, create_input(days_from_today(-1).to_string()))
        .await
        .unwrap_err();

    match err {
        LabError::Validation(message) => assert!(message.contains("invalid date")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[rstest]
#[case::bad_slot(PeminjamanInput { jam_peminjaman: "10:30".into(), ..create_input(days_from_today(1).to_string()) })]
#[case::missing_slot(PeminjamanInput { jam_peminjaman: "".into(), ..create_input(days_from_today(1).to_string()) })]
#[case::bad_date(create_input("12-09-2030".to_string()))]
#[case::missing_lab(PeminjamanInput { lab_id: None, ..create_input(days_from_today(1).to_string()) })]
#[case::blank_image(PeminjamanInput { surat_rekomendasi_image: images(&["https://img/ok.png", " "]), ..create_input(days_from_today(1).to_string()) })]
#[tokio::test]
async fn test_create_rejects_invalid_input(#[case] input: PeminjamanInput) {
    let mut repo = MockPeminjamanRepository::new();
    repo.expect_create_peminjaman().never();

    let err = service(repo, MockLabRepository::new(), MockUserRepository::new())
        .create_peminjaman(9, input)
        .await
        .unwrap_err();

    assert!(matches!(err, LabError::Validation(_)));
}

#[tokio::test]
async fn test_create_for_unknown_lab_is_not_found() {
    let mut labs = MockLabRepository::new();
    labs.expect_get_lab_by_id().returning(|_| Ok(None));
    let mut repo = MockPeminjamanRepository::new();
    repo.expect_create_peminjaman().never();

    let err = service(repo, labs, MockUserRepository::new())
        .create_peminjaman(9, create_input(days_from_today(1).to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, LabError::NotFound(_)));
}

#[rstest]
#[case("accept", 3)]
#[case("reject", 8)]
#[tokio::test]
async fn test_resolving_request_notifies_owner(#[case] status: &str, #[case] template_id: i64) {
    let mut repo = MockPeminjamanRepository::new();
    repo.expect_get_peminjaman_by_id()
        .withf(|id, viewer| *id == 5 && *viewer == Viewer::Admin)
        .returning(|_, _| Ok(Some(peminjaman(5, 42, PeminjamanStatus::Request))));
    repo.expect_save_peminjaman()
        .withf(move |saved: &Peminjaman, previous, urls, notification| {
            let notification = notification.as_ref().unwrap();
            saved.id == 5
                && *previous == PeminjamanStatus::Request
                && saved.jam_peminjaman == TimeSlot::Noon
                && saved.description == "disetujui kaprodi"
                && urls == &vec!["https://img/surat-ttd.png".to_string()]
                && notification.user_id == 42
                && notification.template_id == template_id
                && notification.peminjaman_id == Some(5)
        })
        .times(1)
        .returning(|saved, _, urls, _| Ok((saved, surat_images(5, &urls))));

    let response = service(repo, labs_found(), users_found())
        .update_peminjaman(Viewer::Admin, 5, review_input(status))
        .await
        .unwrap();

    assert_eq!(response.status.as_str(), status);
    assert_eq!(response.surat_rekomendasi_image[0].image_url, "https://img/surat-ttd.png");
}

#[rstest]
#[case(PeminjamanStatus::Request, "request")]
#[case(PeminjamanStatus::Accept, "accept")]
#[case(PeminjamanStatus::Accept, "reject")]
#[case(PeminjamanStatus::Reject, "reject")]
#[case(PeminjamanStatus::Reject, "accept")]
#[tokio::test]
async fn test_invalid_transition_writes_nothing(
    #[case] current: PeminjamanStatus,
    #[case] next: &str,
) {
    let mut repo = MockPeminjamanRepository::new();
    repo.expect_get_peminjaman_by_id()
        .returning(move |id, _| Ok(Some(peminjaman(id, 42, current))));
    repo.expect_save_peminjaman().never();

    let err = service(repo, labs_found(), users_found())
        .update_peminjaman(Viewer::Admin, 5, review_input(next))
        .await
        .unwrap_err();

    assert!(matches!(err, LabError::Validation(_)));
}

#[rstest]
#[case::no_images(PeminjamanInput { surat_rekomendasi_image: vec![], ..review_input("accept") })]
#[case::no_description(PeminjamanInput { description: "  ".into(), ..review_input("accept") })]
#[case::no_status(review_input(""))]
#[case::unknown_status(review_input("approved"))]
#[case::past_date(PeminjamanInput { tanggal_peminjaman: Some(days_from_today(-3).to_string()), ..review_input("accept") })]
#[tokio::test]
async fn test_update_validates_before_loading(#[case] input: PeminjamanInput) {
    let mut repo = MockPeminjamanRepository::new();
    repo.expect_get_peminjaman_by_id().never();
    repo.expect_save_peminjaman().never();

    let err = service(repo, MockLabRepository::new(), MockUserRepository::new())
        .update_peminjaman(Viewer::Admin, 5, input)
        .await
        .unwrap_err();

    assert!(matches!(err, LabError::Validation(_)));
}

#[tokio::test]
async fn test_user_cannot_read_foreign_booking() {
    let mut repo = MockPeminjamanRepository::new();
    repo.expect_get_peminjaman_by_id()
        .withf(|id, viewer| *id == 5 && *viewer == Viewer::User(7))
        .returning(|_, _| Ok(None));

    let err = service(repo, MockLabRepository::new(), MockUserRepository::new())
        .get_peminjaman_by_id(Viewer::User(7), 5)
        .await
        .unwrap_err();

    assert!(matches!(err, LabError::NotFound(_)));
}

#[tokio::test]
async fn test_list_scopes_to_viewer_and_filters() {
    let mut repo = MockPeminjamanRepository::new();
    repo.expect_list_peminjamans()
        .withf(|filter| {
            filter.viewer == Viewer::User(7)
                && filter.lab_name.as_deref() == Some("jaringan")
                && filter.status == Some(PeminjamanStatus::Accept)
                && filter.page.page == 1
                && filter.page.limit == 1000
        })
        .times(1)
        .returning(|_| Ok((vec![peminjaman(3, 7, PeminjamanStatus::Accept)], 1)));
    repo.expect_get_surat_rekomendasi_images()
        .returning(|id| Ok(surat_images(id, &["https://img/a.png".to_string()])));

    let query = ListQuery {
        page: Some("abc".into()),
        limit: Some("0".into()),
        search: Some("jaringan".into()),
        status: Some("accept".into()),
        ..Default::default()
    };
    let page = service(repo, labs_found(), users_found())
        .list_peminjamans(Viewer::User(7), &query)
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 1000);
    assert_eq!(page.items[0].peminjaman_id, 3);
}

#[tokio::test]
async fn test_list_rejects_unknown_status_filter() {
    let mut repo = MockPeminjamanRepository::new();
    repo.expect_list_peminjamans().never();

    let query = ListQuery {
        status: Some("pending".into()),
        ..Default::default()
    };
    let result = service(repo, MockLabRepository::new(), MockUserRepository::new())
        .list_peminjamans(Viewer::Admin, &query)
        .await;

    assert!(matches!(result, Err(LabError::Validation(_))));
}

#[tokio::test]
async fn test_delete_missing_booking_is_not_found() {
    let mut repo = MockPeminjamanRepository::new();
    repo.expect_get_peminjaman_by_id().returning(|_, _| Ok(None));
    repo.expect_delete_peminjaman().never();

    let result = service(repo, MockLabRepository::new(), MockUserRepository::new())
        .delete_peminjaman(99)
        .await;

    assert!(matches!(result, Err(LabError::NotFound(_))));
}
