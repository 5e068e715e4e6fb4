//! Half-open interval overlap against the appointment ledger.
//!
//! `[a0, a1)` and `[b0, b1)` conflict iff `a0 < b1 && b0 < a1`, so a slot that
//! ends exactly when an appointment starts (or starts exactly when one ends)
//! is not a conflict.

use chrono::{Duration, NaiveDateTime};

use crate::models::appointment::Appointment;

/// Duration assumed for appointments stored without one.
pub const MISSING_DURATION_FALLBACK_MINUTES: u32 = 30;

pub fn overlaps<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && b_start < a_end
}

/// First scheduled appointment overlapping the candidate, if any.
pub fn find_conflict<'a>(
    candidate_start: NaiveDateTime,
    duration_minutes: u32,
    appointments: &'a [Appointment],
    fallback_duration_minutes: u32,
) -> Option<&'a Appointment> {
    let candidate_end = candidate_start + Duration::minutes(i64::from(duration_minutes));

    appointments
        .iter()
        .filter(|appointment| appointment.is_scheduled())
        .find(|appointment| {
            overlaps(
                candidate_start,
                candidate_end,
                appointment.start_time,
                appointment.end_time(fallback_duration_minutes),
            )
        })
}

pub fn is_occupied(
    candidate_start: NaiveDateTime,
    duration_minutes: u32,
    appointments: &[Appointment],
    fallback_duration_minutes: u32,
) -> bool {
    find_conflict(
        candidate_start,
        duration_minutes,
        appointments,
        fallback_duration_minutes,
    )
    .is_some()
}
