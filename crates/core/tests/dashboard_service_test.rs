mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;

use common::{at, jadwal, user};
use labsched_core::{
    errors::LabError,
    models::{
        DashboardTotals, JadwalStatus, LabCount, MonthlyTotals, RecentPeminjaman,
        UserTeraktifMeminjam,
    },
    repositories::MockDashboardRepository,
    services::DashboardService,
};

fn recent(id: i64, day: u32) -> RecentPeminjaman {
    RecentPeminjaman {
        id,
        lab_name: format!("Laboratorium {}", id),
        created_at: at(day),
        updated_at: at(day),
    }
}

#[tokio::test]
async fn test_dashboard_orders_recent_rows_newest_first() {
    let mut repo = MockDashboardRepository::new();
    repo.expect_totals().returning(|_| {
        Ok(DashboardTotals {
            users: 12,
            users_today: 2,
            labs: 3,
            peminjaman: 40,
            peminjaman_today: 1,
            jadwal: 9,
            jadwal_today: 0,
        })
    });
    repo.expect_recent_peminjamans()
        .withf(|limit| *limit == 10)
        .returning(|_| Ok(vec![recent(1, 3), recent(2, 9), recent(3, 5)]));
    repo.expect_recent_jadwals().returning(|_| {
        let mut older = jadwal(1, "A", JadwalStatus::NotUsed);
        older.created_at = at(2);
        let mut newer = jadwal(2, "B", JadwalStatus::NotUsed);
        newer.created_at = at(8);
        Ok(vec![older, newer])
    });
    repo.expect_recent_users().returning(|_| Ok(vec![user(1)]));
    repo.expect_most_active_borrowers()
        .withf(|limit| *limit == 3)
        .returning(|_| {
            Ok(vec![UserTeraktifMeminjam {
                full_name: "Nadiah".to_string(),
                jumlah_peminjaman: 7,
            }])
        });

    let dashboard = DashboardService::new(Arc::new(repo))
        .dashboard_get_all()
        .await
        .unwrap();

    assert_eq!(dashboard.count_user.total_user, 12);
    assert_eq!(dashboard.count_peminjaman.total_peminjaman_today, 1);
    let ids: Vec<i64> = dashboard.new_peminjaman.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert_eq!(dashboard.new_peminjaman[0].kegiatan, "Peminjaman");
    assert_eq!(dashboard.new_jadwal[0].id, 2);
    assert_eq!(dashboard.user_teraktif_meminjam[0].jumlah_peminjaman, 7);
}

#[rstest]
#[case(13, 2024)]
#[case(0, 2024)]
#[case(-1, 2024)]
#[case(6, 0)]
#[tokio::test]
async fn test_filter_rejects_out_of_range(#[case] month: i64, #[case] year: i64) {
    let mut repo = MockDashboardRepository::new();
    repo.expect_monthly_totals().never();

    let result = DashboardService::new(Arc::new(repo))
        .dashboard_get_by_month(month, year)
        .await;

    assert!(matches!(result, Err(LabError::Validation(_))));
}

#[tokio::test]
async fn test_filter_breaks_down_every_lab() {
    let mut repo = MockDashboardRepository::new();
    repo.expect_monthly_totals()
        .withf(|month, year| *month == 2 && *year == 2024)
        .returning(|_, _| {
            Ok(MonthlyTotals {
                users: 4,
                labs: 5,
                peminjaman: 6,
                jadwal: 2,
            })
        });
    repo.expect_peminjaman_per_lab().returning(|_, _| {
        Ok((1..=5)
            .map(|i| LabCount {
                name: format!("Laboratorium {}", i),
                total: if i == 4 { 2 } else { 1 },
            })
            .collect())
    });
    repo.expect_jadwal_per_lab().returning(|_, _| {
        Ok(vec![LabCount {
            name: "Laboratorium Jaringan".to_string(),
            total: 2,
        }])
    });

    let filtered = DashboardService::new(Arc::new(repo))
        .dashboard_get_by_month(2, 2024)
        .await
        .unwrap();

    assert_eq!(filtered.month, 2);
    assert_eq!(filtered.count_peminjaman.per_lab.len(), 5);
    assert_eq!(
        filtered
            .count_peminjaman
            .per_lab
            .iter()
            .map(|c| c.total)
            .sum::<i64>(),
        filtered.count_peminjaman.total_peminjaman
    );
    assert_eq!(filtered.count_jadwal.per_lab[0].total, 2);
}
