pub mod account;
pub mod dashboard;
pub mod history;
pub mod jadwal;
pub mod lab;
pub mod notification;
pub mod peminjaman;
