#![allow(dead_code)]

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use fake::{Fake, faker::name::en::Name};

use labsched_core::models::{
    Jadwal, JadwalStatus, Lab, LabImage, Peminjaman, PeminjamanStatus, Role,
    SuratRekomendasiImage, TemplateMessage, TimeSlot, User,
};

pub fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap()
}

pub fn today() -> NaiveDate {
    labsched_core::models::today()
}

pub fn days_from_today(days: i64) -> NaiveDate {
    if days >= 0 {
        today().checked_add_days(Days::new(days as u64)).unwrap()
    } else {
        today().checked_sub_days(Days::new(days.unsigned_abs())).unwrap()
    }
}

pub fn user(id: i64) -> User {
    User {
        id,
        full_name: Name().fake(),
        email: format!("user{}@kampus.ac.id", id),
        password_hash: labsched_core::auth::hash_password("rahasia123").unwrap(),
        nim_nip: format!("13012{:04}", id),
        profile_picture: "https://img/p.png".to_string(),
        role: Role::User,
        created_at: at(1),
        updated_at: at(1),
        deleted_at: None,
    }
}

pub fn lab(id: i64) -> Lab {
    Lab {
        id,
        name: format!("Laboratorium {}", id),
        description: "Gedung A lantai 2".to_string(),
        created_at: at(1),
        updated_at: at(1),
    }
}

pub fn lab_images(lab_id: i64, urls: &[String]) -> Vec<LabImage> {
    urls.iter()
        .enumerate()
        .map(|(i, url)| LabImage {
            id: i as i64 + 1,
            lab_id,
            image_url: url.clone(),
        })
        .collect()
}

pub fn peminjaman(id: i64, user_id: i64, status: PeminjamanStatus) -> Peminjaman {
    Peminjaman {
        id,
        user_id,
        lab_id: 1,
        tanggal_peminjaman: days_from_today(3),
        jam_peminjaman: TimeSlot::Morning,
        description: "praktikum jaringan".to_string(),
        status,
        created_at: at(2),
        updated_at: at(2),
    }
}

pub fn surat_images(peminjaman_id: i64, urls: &[String]) -> Vec<SuratRekomendasiImage> {
    urls.iter()
        .enumerate()
        .map(|(i, url)| SuratRekomendasiImage {
            id: i as i64 + 1,
            peminjaman_id,
            image_url: url.clone(),
        })
        .collect()
}

pub fn jadwal(id: i64, name_user: &str, status: JadwalStatus) -> Jadwal {
    Jadwal {
        id,
        tanggal_jadwal: days_from_today(1),
        waktu_jadwal: TimeSlot::Noon,
        name_user: name_user.to_string(),
        name_laboratorium: "Laboratorium Jaringan".to_string(),
        status,
        created_at: at(3),
        updated_at: at(3),
    }
}

pub fn template(id: i64, title: &str, content: &str) -> TemplateMessage {
    TemplateMessage {
        id,
        title: title.to_string(),
        content: content.to_string(),
        created_at: at(1),
        updated_at: at(1),
    }
}
