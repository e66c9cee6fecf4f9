use axum::http::{StatusCode, header};
use rstest::rstest;
use serde_json::Value;

use labsched_core::models::{LabCount, MonthlyTotals, Role};

use crate::test_utils::{TestContext, bearer};

#[rstest]
#[case::month_too_large("13", "2024")]
#[case::month_zero("0", "2024")]
#[case::month_not_a_number("mei", "2024")]
#[case::year_missing("5", "")]
#[tokio::test]
async fn test_bad_month_filter_is_rejected(#[case] month: &str, #[case] year: &str) {
    let mut ctx = TestContext::new();
    ctx.dashboard.expect_monthly_totals().never();
    let server = ctx.server();

    let response = server
        .get("/api/v1/admin/dashboard/filter")
        .add_query_param("month", month)
        .add_query_param("year", year)
        .add_header(header::AUTHORIZATION, bearer(1, Role::Admin))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["status_code"], 400);
}

#[tokio::test]
async fn test_month_filter_returns_counts() {
    let mut ctx = TestContext::new();
    ctx.dashboard
        .expect_monthly_totals()
        .withf(|month, year| *month == 5 && *year == 2024)
        .times(1)
        .returning(|_, _| {
            Ok(MonthlyTotals {
                users: 4,
                labs: 2,
                peminjaman: 3,
                jadwal: 1,
            })
        });
    ctx.dashboard.expect_peminjaman_per_lab().returning(|_, _| {
        Ok(vec![
            LabCount {
                name: "Laboratorium Jaringan".to_string(),
                total: 3,
            },
            LabCount {
                name: "Laboratorium Multimedia".to_string(),
                total: 0,
            },
        ])
    });
    ctx.dashboard.expect_jadwal_per_lab().returning(|_, _| Ok(vec![]));
    let server = ctx.server();

    let response = server
        .get("/api/v1/admin/dashboard/filter")
        .add_query_param("month", "5")
        .add_query_param("year", "2024")
        .add_header(header::AUTHORIZATION, bearer(1, Role::Admin))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let data = &response.json::<Value>()["data"];
    assert_eq!(data["month"], 5);
    assert_eq!(data["count_user"]["total_user"], 4);
    assert_eq!(data["count_peminjaman"]["total_peminjaman"], 3);
    assert_eq!(
        data["count_peminjaman"]["per_lab"].as_array().unwrap().len(),
        2
    );
}
