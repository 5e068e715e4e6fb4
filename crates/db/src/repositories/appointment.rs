use crate::models::DbAppointment;
use barberbook_core::{
    models::appointment::{Appointment, AppointmentStatus, NewAppointment},
    scheduling::{availability::requested_end, conflict::is_occupied},
};
use chrono::{Datelike, Duration, NaiveDateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Appointments longer than this are not expected; bounds the lookback used
/// to catch bookings that started the previous day and spill over.
const MAX_LOOKBACK_HOURS: i64 = 24;

/// Postgres SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

pub async fn get_scheduled_appointments(
    pool: &Pool<Postgres>,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, client_name, client_phone, service_name, start_time,
               duration_minutes, status, created_at
        FROM appointments
        WHERE status = 'scheduled'
          AND start_time >= $1
          AND start_time < $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(from - Duration::hours(MAX_LOOKBACK_HOURS))
    .bind(to)
    .fetch_all(pool)
    .await?;

    tracing::debug!(
        "Loaded {} scheduled appointments between {} and {}",
        appointments.len(),
        from,
        to
    );
    Ok(appointments)
}

/// Re-checks the slot and inserts under per-day advisory locks.
///
/// Returns `None` when the slot is already taken. Every calendar day touched by
/// the new appointment is locked in ascending order so concurrent bookings of
/// the same day serialize without deadlocking.
pub async fn book_appointment(
    pool: &Pool<Postgres>,
    new: &NewAppointment,
    fallback_duration_minutes: u32,
) -> Result<Option<DbAppointment>> {
    let start = new.start_time;
    let end = requested_end(start, new.duration_minutes);

    let mut tx = pool.begin().await?;

    let mut day = start.date();
    while day <= end.date() {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(i64::from(day.num_days_from_ce()))
            .execute(&mut *tx)
            .await?;
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    let rows = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, client_name, client_phone, service_name, start_time,
               duration_minutes, status, created_at
        FROM appointments
        WHERE status = 'scheduled'
          AND start_time >= $1
          AND start_time < $2
        "#,
    )
    .bind(start - Duration::hours(MAX_LOOKBACK_HOURS))
    .bind(end)
    .fetch_all(&mut *tx)
    .await?;

    let existing = rows
        .into_iter()
        .map(Appointment::try_from)
        .collect::<Result<Vec<_>>>()?;

    if is_occupied(start, new.duration_minutes, &existing, fallback_duration_minutes) {
        tracing::debug!("Slot {} already taken, rolling back", start);
        tx.rollback().await?;
        return Ok(None);
    }

    let inserted = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, client_name, client_phone, service_name, start_time,
                                  duration_minutes, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, client_name, client_phone, service_name, start_time,
                  duration_minutes, status, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&new.client_name)
    .bind(new.client_phone.as_deref())
    .bind(&new.service_name)
    .bind(start)
    .bind(new.duration_minutes as i32)
    .bind(AppointmentStatus::Scheduled.as_str())
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await;

    let appointment = match inserted {
        Ok(appointment) => appointment,
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            tracing::debug!("Unique start-time constraint rejected {}", start);
            tx.rollback().await?;
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    tx.commit().await?;

    tracing::debug!("Appointment booked: id={}, start={}", appointment.id, start);
    Ok(Some(appointment))
}

/// Moves an appointment from `from` to `to`; `None` when no appointment with
/// this id currently has status `from`.
pub async fn transition_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> Result<Option<DbAppointment>> {
    tracing::debug!("Appointment {}: {} -> {}", id, from, to);

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET status = $3
        WHERE id = $1 AND status = $2
        RETURNING id, client_name, client_phone, service_name, start_time,
                  duration_minutes, status, created_at
        "#,
    )
    .bind(id)
    .bind(from.as_str())
    .bind(to.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}
