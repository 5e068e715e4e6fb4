use crate::models::DbBusinessSettings;
use barberbook_core::models::settings::BusinessSettings;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_business_settings(pool: &Pool<Postgres>) -> Result<Option<DbBusinessSettings>> {
    tracing::debug!("Loading business settings");

    let settings = sqlx::query_as::<_, DbBusinessSettings>(
        r#"
        SELECT default_duration_minutes, slot_stride_minutes, midday,
               fallback_window_start, fallback_window_end, max_alternatives, updated_at
        FROM business_settings
        WHERE id = 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(settings)
}

/// Inserts the settings row, or leaves an existing one untouched.
pub async fn insert_business_settings_if_missing(
    pool: &Pool<Postgres>,
    settings: &BusinessSettings,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO business_settings (
            id, default_duration_minutes, slot_stride_minutes, midday,
            fallback_window_start, fallback_window_end, max_alternatives
        )
        VALUES (1, $1, $2, $3, $4, $5, $6)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(settings.default_duration_minutes as i32)
    .bind(settings.slot_stride_minutes as i32)
    .bind(settings.midday.as_naive())
    .bind(settings.fallback_window_start.as_naive())
    .bind(settings.fallback_window_end.as_naive())
    .bind(settings.max_alternatives as i32)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
