//! Usecases. Every business rule lives here; repositories only move rows.

pub mod dashboard;
pub mod history;
pub mod jadwal;
pub mod lab;
pub mod notification;
pub mod peminjaman;
pub mod template_message;
pub mod user;

pub use dashboard::DashboardService;
pub use history::HistoryService;
pub use jadwal::JadwalService;
pub use lab::LabService;
pub use notification::NotificationService;
pub use peminjaman::PeminjamanService;
pub use template_message::TemplateMessageService;
pub use user::UserService;

use crate::errors::{LabError, LabResult};

/// Trimmed value of a mandatory text field.
pub(crate) fn required(field: &str, value: &str) -> LabResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LabError::validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Like [`required`] but keeps the value verbatim, for secrets.
pub(crate) fn present<'a>(field: &str, value: &'a str) -> LabResult<&'a str> {
    if value.is_empty() {
        return Err(LabError::validation(format!("{} is required", field)));
    }
    Ok(value)
}

/// Every URL must be non-empty; one blank entry fails the whole list.
pub(crate) fn image_urls<I>(field: &str, urls: I) -> LabResult<Vec<String>>
where
    I: IntoIterator<Item = String>,
{
    urls.into_iter()
        .map(|url| {
            let url = url.trim();
            if url.is_empty() {
                Err(LabError::validation(format!(
                    "{} contains an empty image url",
                    field
                )))
            } else {
                Ok(url.to_string())
            }
        })
        .collect()
}
