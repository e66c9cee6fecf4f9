mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;

use common::{days_from_today, jadwal, lab, user};
use labsched_core::{
    errors::LabError,
    models::{BeritaAcaraImage, BeritaAcaraImageInput, JadwalInput, JadwalStatus, Viewer},
    pagination::ListQuery,
    repositories::{MockJadwalRepository, MockLabRepository, MockUserRepository},
    services::JadwalService,
};

fn service(jadwals: MockJadwalRepository) -> JadwalService {
    JadwalService::new(
        Arc::new(jadwals),
        Arc::new(MockLabRepository::new()),
        Arc::new(MockUserRepository::new()),
    )
}

fn berita_acara(jadwal_id: i64, urls: &[String]) -> Vec<BeritaAcaraImage> {
    urls.iter()
        .enumerate()
        .map(|(i, url)| BeritaAcaraImage {
            id: i as i64 + 1,
            jadwal_id,
            image_url: url.clone(),
        })
        .collect()
}

fn input(days: i64, status: &str) -> JadwalInput {
    JadwalInput {
        tanggal_jadwal: Some(days_from_today(days).to_string()),
        waktu_jadwal: "15:00".to_string(),
        name_user: "Nadiah".to_string(),
        name_laboratorium: "Laboratorium Jaringan".to_string(),
        beritaacara_image: vec![BeritaAcaraImageInput {
            beritaacara_image_url: "https://img/ba.png".to_string(),
        }],
        status: status.to_string(),
    }
}

#[tokio::test]
async fn test_create_seeds_notused() {
    let mut repo = MockJadwalRepository::new();
    repo.expect_create_jadwal()
        .withf(|new, urls| new.status == JadwalStatus::NotUsed && urls.len() == 1)
        .times(1)
        .returning(|new, urls| {
            let mut row = jadwal(21, &new.name_user, new.status);
            row.tanggal_jadwal = new.tanggal_jadwal;
            Ok((row, berita_acara(21, &urls)))
        });

    let response = service(repo)
        .create_jadwal(input(1, "finished"))
        .await
        .unwrap();

    assert_eq!(response.status, JadwalStatus::NotUsed);
    assert_eq!(response.beritaacara_image[0].beritaacara_image_url, "https://img/ba.png");
}

#[tokio::test]
async fn test_create_rejects_past_date() {
    let mut repo = MockJadwalRepository::new();
    repo.expect_create_jadwal().never();

    let err = service(repo).create_jadwal(input(-1, "")).await.unwrap_err();
    assert!(matches!(err, LabError::Validation(_)));
}

#[rstest]
#[case::notused_future("notused", 2, true)]
#[case::notused_past("notused", -2, false)]
#[case::inused_today("inused", 0, true)]
#[case::inused_future("inused", 2, false)]
#[case::finished_past("finished", -5, true)]
#[case::finished_future("finished", 1, false)]
#[tokio::test]
async fn test_update_date_direction_follows_status(
    #[case] status: &str,
    #[case] days: i64,
    #[case] allowed: bool,
) {
    let mut repo = MockJadwalRepository::new();
    repo.expect_get_jadwal_by_id()
        .returning(|id| Ok(Some(jadwal(id, "Nadiah", JadwalStatus::NotUsed))));
    repo.expect_save_jadwal()
        .times(if allowed { 1 } else { 0 })
        .returning(|row, urls| {
            let id = row.id;
            Ok((row, berita_acara(id, &urls)))
        });

    let result = service(repo).update_jadwal(4, input(days, status)).await;

    assert_eq!(result.is_ok(), allowed);
}

#[rstest]
#[case::no_images(JadwalInput { beritaacara_image: vec![], ..input(1, "notused") })]
#[case::no_status(input(1, ""))]
#[case::no_user(JadwalInput { name_user: " ".into(), ..input(1, "notused") })]
#[case::no_date(JadwalInput { tanggal_jadwal: None, ..input(1, "notused") })]
#[case::bad_slot(JadwalInput { waktu_jadwal: "08:00".into(), ..input(1, "notused") })]
#[tokio::test]
async fn test_update_requires_every_field(#[case] input: JadwalInput) {
    let mut repo = MockJadwalRepository::new();
    repo.expect_get_jadwal_by_id().never();
    repo.expect_save_jadwal().never();

    let err = service(repo).update_jadwal(4, input).await.unwrap_err();
    assert!(matches!(err, LabError::Validation(_)));
}

#[rstest]
#[case("Nadiah", true)]
#[case("Orang Lain", false)]
#[tokio::test]
async fn test_user_sees_only_own_slot(#[case] owner: &'static str, #[case] visible: bool) {
    let mut repo = MockJadwalRepository::new();
    repo.expect_get_jadwal_by_id()
        .returning(move |id| Ok(Some(jadwal(id, owner, JadwalStatus::InUsed))));
    repo.expect_get_berita_acara_images()
        .returning(|_| Ok(vec![]));
    let mut users = MockUserRepository::new();
    users.expect_get_user_by_id().returning(|id| {
        let mut u = user(id);
        u.full_name = "Nadiah".to_string();
        Ok(Some(u))
    });

    let service = JadwalService::new(
        Arc::new(repo),
        Arc::new(MockLabRepository::new()),
        Arc::new(users),
    );
    let result = service.get_jadwal_by_id(Viewer::User(3), 8).await;

    assert_eq!(result.is_ok(), visible);
    if !visible {
        assert!(matches!(result, Err(LabError::NotFound(_))));
    }
}

#[tokio::test]
async fn test_lab_name_verification_when_enabled() {
    let mut repo = MockJadwalRepository::new();
    repo.expect_create_jadwal().never();
    let mut labs = MockLabRepository::new();
    labs.expect_get_lab_by_name()
        .withf(|name| name == "Laboratorium Jaringan")
        .times(1)
        .returning(|_| Ok(None));

    let service = JadwalService::new(
        Arc::new(repo),
        Arc::new(labs),
        Arc::new(MockUserRepository::new()),
    )
    .with_lab_name_verification(true);

    let err = service.create_jadwal(input(1, "")).await.unwrap_err();
    assert!(matches!(err, LabError::Validation(_)));
}

#[tokio::test]
async fn test_lab_name_verification_accepts_known_lab() {
    let mut repo = MockJadwalRepository::new();
    repo.expect_create_jadwal()
        .times(1)
        .returning(|new, urls| Ok((jadwal(30, &new.name_user, new.status), berita_acara(30, &urls))));
    let mut labs = MockLabRepository::new();
    labs.expect_get_lab_by_name()
        .returning(|_| Ok(Some(lab(3))));

    let service = JadwalService::new(
        Arc::new(repo),
        Arc::new(labs),
        Arc::new(MockUserRepository::new()),
    )
    .with_lab_name_verification(true);

    assert!(service.create_jadwal(input(1, "")).await.is_ok());
}

#[tokio::test]
async fn test_search_is_repeatable() {
    let mut repo = MockJadwalRepository::new();
    repo.expect_list_jadwals()
        .withf(|page, name| page.limit == 1000 && name.as_deref() == Some("Jaringan"))
        .times(2)
        .returning(|_, _| Ok((vec![jadwal(1, "Nadiah", JadwalStatus::NotUsed)], 1)));
    repo.expect_get_berita_acara_images()
        .returning(|id| Ok(berita_acara(id, &["https://img/x.png".to_string()])));

    let service = service(repo);
    let query = ListQuery {
        name: Some("Jaringan".into()),
        ..Default::default()
    };
    let first = service.search_jadwal_available(&query).await.unwrap();
    let second = service.search_jadwal_available(&query).await.unwrap();

    assert_eq!(first, second);
}
