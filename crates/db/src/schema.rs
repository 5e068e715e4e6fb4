use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Single-row business configuration
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS business_settings (
            id SMALLINT PRIMARY KEY DEFAULT 1 CHECK (id = 1),
            default_duration_minutes INTEGER NOT NULL DEFAULT 30 CHECK (default_duration_minutes > 0),
            slot_stride_minutes INTEGER NOT NULL DEFAULT 30 CHECK (slot_stride_minutes > 0),
            midday TIME NOT NULL DEFAULT '12:00',
            fallback_window_start TIME NOT NULL DEFAULT '09:00',
            fallback_window_end TIME NOT NULL DEFAULT '18:00',
            max_alternatives INTEGER NOT NULL DEFAULT 5 CHECK (max_alternatives >= 0),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_fallback_window CHECK (fallback_window_end > fallback_window_start)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create work_intervals table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS work_intervals (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            weekday SMALLINT NOT NULL CHECK (weekday BETWEEN 0 AND 6),
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            CONSTRAINT valid_work_interval CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table. start_time is business-local wall time.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            client_name VARCHAR(255) NOT NULL,
            client_phone VARCHAR(32) NULL,
            service_name VARCHAR(255) NOT NULL,
            start_time TIMESTAMP NOT NULL,
            duration_minutes INTEGER NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'scheduled'
                CHECK (status IN ('scheduled', 'cancelled', 'completed', 'no_show')),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // The partial unique index backs up the booking lock: two scheduled
    // appointments can never share a start time.
    let indexes = [
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_services_lower_name ON services(LOWER(name))",
        "CREATE INDEX IF NOT EXISTS idx_work_intervals_weekday ON work_intervals(weekday)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_start_time ON appointments(start_time)",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_appointments_scheduled_start \
         ON appointments(start_time) WHERE status = 'scheduled'",
    ];
    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
