pub mod dashboard;
pub mod history;
pub mod jadwal;
pub mod lab;
pub mod notification;
pub mod peminjaman;
pub mod template_message;
pub mod time_slot;
pub mod user;

pub use dashboard::*;
pub use history::*;
pub use jadwal::*;
pub use lab::*;
pub use notification::*;
pub use peminjaman::*;
pub use template_message::*;
pub use time_slot::*;
pub use user::*;
