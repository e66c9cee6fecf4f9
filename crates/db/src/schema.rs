use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

use labsched_core::models::{TEMPLATE_PEMINJAMAN_ACCEPTED, TEMPLATE_PEMINJAMAN_REJECTED};

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        full_name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL,
        nim_nip VARCHAR(64) NOT NULL,
        profile_picture TEXT NOT NULL DEFAULT '',
        role VARCHAR(16) NOT NULL DEFAULT 'user' CHECK (role IN ('user', 'admin')),
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        deleted_at TIMESTAMP WITH TIME ZONE NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS labs (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        description TEXT NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS lab_images (
        id BIGSERIAL PRIMARY KEY,
        lab_id BIGINT NOT NULL REFERENCES labs(id) ON DELETE CASCADE,
        image_url TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS jadwal (
        id BIGSERIAL PRIMARY KEY,
        tanggal_jadwal DATE NOT NULL,
        waktu_jadwal VARCHAR(5) NOT NULL CHECK (waktu_jadwal IN ('09:00', '12:00', '15:00')),
        name_user VARCHAR(255) NOT NULL,
        name_laboratorium VARCHAR(255) NOT NULL,
        status VARCHAR(16) NOT NULL CHECK (status IN ('notused', 'inused', 'finished')),
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS berita_acara_images (
        id BIGSERIAL PRIMARY KEY,
        jadwal_id BIGINT NOT NULL REFERENCES jadwal(id) ON DELETE CASCADE,
        image_url TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS peminjaman (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id),
        lab_id BIGINT NOT NULL REFERENCES labs(id) ON DELETE CASCADE,
        tanggal_peminjaman DATE NOT NULL,
        jam_peminjaman VARCHAR(5) NOT NULL CHECK (jam_peminjaman IN ('09:00', '12:00', '15:00')),
        description TEXT NOT NULL DEFAULT '',
        status VARCHAR(16) NOT NULL CHECK (status IN ('request', 'accept', 'reject')),
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS surat_rekomendasi_images (
        id BIGSERIAL PRIMARY KEY,
        peminjaman_id BIGINT NOT NULL REFERENCES peminjaman(id) ON DELETE CASCADE,
        image_url TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS template_messages (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        content TEXT NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS notifications (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id),
        template_id BIGINT NOT NULL REFERENCES template_messages(id),
        peminjaman_id BIGINT NULL REFERENCES peminjaman(id) ON DELETE SET NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS history_searches (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id),
        name VARCHAR(255) NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS history_seen_labs (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(id),
        lab_id BIGINT NOT NULL REFERENCES labs(id) ON DELETE CASCADE,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        UNIQUE (user_id, lab_id)
    );
    "#,
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_lab_images_lab_id ON lab_images(lab_id)",
    "CREATE INDEX IF NOT EXISTS idx_berita_acara_images_jadwal_id ON berita_acara_images(jadwal_id)",
    "CREATE INDEX IF NOT EXISTS idx_peminjaman_user_id ON peminjaman(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_peminjaman_lab_id ON peminjaman(lab_id)",
    "CREATE INDEX IF NOT EXISTS idx_surat_rekomendasi_images_peminjaman_id ON surat_rekomendasi_images(peminjaman_id)",
    "CREATE INDEX IF NOT EXISTS idx_notifications_user_id ON notifications(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_history_searches_user_id ON history_searches(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_jadwal_name_laboratorium ON jadwal(name_laboratorium)",
];

/// Creates every table and index if missing and seeds the booking-status templates.
pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in TABLES.iter().chain(INDEXES) {
        sqlx::query(*statement).execute(pool).await?;
    }

    seed_templates(pool).await?;

    info!("Database schema initialized successfully.");
    Ok(())
}

async fn seed_templates(pool: &Pool<Postgres>) -> Result<()> {
    let templates = [
        (
            TEMPLATE_PEMINJAMAN_ACCEPTED,
            "Peminjaman Diterima",
            "Halo [Nama Pengguna], pengajuan peminjaman laboratorium Anda telah diterima.",
        ),
        (
            TEMPLATE_PEMINJAMAN_REJECTED,
            "Peminjaman Ditolak",
            "Halo [Nama Pengguna], mohon maaf pengajuan peminjaman laboratorium Anda ditolak.",
        ),
    ];

    for (id, title, content) in templates {
        sqlx::query(
            r#"
            INSERT INTO template_messages (id, title, content)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .execute(pool)
        .await?;
    }

    // Explicit ids above bypass the sequence.
    sqlx::query(
        r#"
        SELECT setval(
            pg_get_serial_sequence('template_messages', 'id'),
            (SELECT MAX(id) FROM template_messages)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Inserts an administrator account unless the email is already taken.
pub async fn seed_admin(
    pool: &Pool<Postgres>,
    full_name: &str,
    email: &str,
    password_hash: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (full_name, email, password_hash, nim_nip, profile_picture, role)
        VALUES ($1, $2, $3, '-', $4, 'admin')
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind(full_name)
    .bind(email.to_lowercase())
    .bind(password_hash)
    .bind(labsched_core::models::DEFAULT_PROFILE_PICTURE)
    .execute(pool)
    .await?;

    let created = result.rows_affected() == 1;
    if created {
        info!("Seeded admin account {}", email);
    }
    Ok(created)
}
