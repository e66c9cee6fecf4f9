//! sqlx implementations of the core repository traits.
//!
//! Each module exposes plain query functions over a `Pool<Postgres>` (or a
//! transaction's connection) plus a `Pg*Repository` wrapper that implements the
//! corresponding trait from `labsched_core::repositories`.

pub mod dashboard;
pub mod history;
pub mod jadwal;
pub mod lab;
pub mod notification;
pub mod peminjaman;
pub mod template_message;
pub mod user;

pub use dashboard::PgDashboardRepository;
pub use history::PgHistoryRepository;
pub use jadwal::PgJadwalRepository;
pub use lab::PgLabRepository;
pub use notification::PgNotificationRepository;
pub use peminjaman::PgPeminjamanRepository;
pub use template_message::PgTemplateMessageRepository;
pub use user::PgUserRepository;

/// `%term%` for ILIKE filters.
pub(crate) fn like_pattern(term: Option<String>) -> Option<String> {
    term.map(|term| format!("%{}%", term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")))
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn escapes_wildcards() {
        assert_eq!(like_pattern(Some("50%_a".into())), Some("%50\\%\\_a%".to_string()));
        assert_eq!(like_pattern(None), None);
    }
}
