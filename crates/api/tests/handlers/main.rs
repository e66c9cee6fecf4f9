mod test_utils;

mod account_test;
mod dashboard_test;
mod health_test;
mod middleware_test;
mod peminjaman_test;
