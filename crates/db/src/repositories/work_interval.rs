use crate::models::DbWorkInterval;
use chrono::NaiveTime;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_work_interval(
    pool: &Pool<Postgres>,
    weekday: i16,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<DbWorkInterval> {
    let id = Uuid::new_v4();

    let interval = sqlx::query_as::<_, DbWorkInterval>(
        r#"
        INSERT INTO work_intervals (id, weekday, start_time, end_time, active)
        VALUES ($1, $2, $3, $4, TRUE)
        RETURNING id, weekday, start_time, end_time, active
        "#,
    )
    .bind(id)
    .bind(weekday)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(pool)
    .await?;

    Ok(interval)
}

pub async fn get_active_work_intervals(
    pool: &Pool<Postgres>,
    weekday: i16,
) -> Result<Vec<DbWorkInterval>> {
    let intervals = sqlx::query_as::<_, DbWorkInterval>(
        r#"
        SELECT id, weekday, start_time, end_time, active
        FROM work_intervals
        WHERE weekday = $1 AND active = TRUE
        ORDER BY start_time ASC
        "#,
    )
    .bind(weekday)
    .fetch_all(pool)
    .await?;

    tracing::debug!(
        "Loaded {} active work intervals for weekday {}",
        intervals.len(),
        weekday
    );
    Ok(intervals)
}

pub async fn count_work_intervals(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM work_intervals")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
