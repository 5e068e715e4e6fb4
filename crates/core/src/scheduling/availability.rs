//! # Availability Queries
//!
//! Orchestrates catalog, work schedule, ledger snapshot, slot generation and
//! conflict detection for the two public queries:
//!
//! 1. **List slots** for a date and service. Candidates come from the
//!    configured work intervals of the date's weekday. A weekday without
//!    active intervals is a closed day and short-circuits before any other
//!    read.
//! 2. **Check a slot** for a date, time and service. Only the ledger is
//!    consulted; when the slot is taken, alternatives are drawn from the fixed
//!    fallback window in [`BusinessSettings`], not from the work intervals, so
//!    suggestions survive incomplete interval configuration.
//!
//! Neither query writes. A slot reported free can still be claimed by a
//! concurrent booking; the booking path re-checks under its own lock.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::Appointment,
        availability::{Slot, SlotCheck, SlotListing, SlotPeriods, SlotState},
        clock::ClockTime,
        settings::BusinessSettings,
    },
    query::{SlotCheckQuery, SlotListingQuery},
    scheduling::{
        catalog::ServiceCatalog,
        conflict::{MISSING_DURATION_FALLBACK_MINUTES, is_occupied},
        slot_generator::{generate, generate_in_window},
        work_schedule::WorkSchedule,
    },
    store::SchedulingStore,
};

/// Per-request query service over a store and an explicit settings value.
pub struct AvailabilityService<'a, S: SchedulingStore + ?Sized> {
    store: &'a S,
    settings: &'a BusinessSettings,
}

impl<'a, S: SchedulingStore + ?Sized> AvailabilityService<'a, S> {
    pub fn new(store: &'a S, settings: &'a BusinessSettings) -> Self {
        Self { store, settings }
    }

    pub async fn list_available_slots(&self, query: &SlotListingQuery) -> BookingResult<SlotListing> {
        let date = query.date;
        let weekday = date.weekday();

        let intervals = self.store.get_active_work_intervals(weekday).await?;
        let schedule = WorkSchedule::resolve(weekday, intervals);
        if schedule.is_closed() {
            debug!("No active work intervals on {} ({:?}), closed", date, weekday);
            return Ok(SlotListing::closed(date));
        }

        let duration = self.resolve_duration(&query.service).await?;
        let appointments = self.day_appointments(date).await?;

        let candidates = generate(
            schedule.intervals(),
            duration,
            self.settings.slot_stride_minutes,
        );
        let slots = classify(
            date,
            &candidates,
            duration,
            &appointments,
            self.fallback_duration(),
        );

        debug!(
            "Listed {} candidates for '{}' on {} ({} min)",
            slots.len(),
            query.service,
            date,
            duration
        );

        Ok(assemble_listing(date, duration, &slots, self.settings.midday))
    }

    pub async fn check_slot_availability(&self, query: &SlotCheckQuery) -> BookingResult<SlotCheck> {
        let duration = self.resolve_duration(&query.service).await?;
        let requested_start = query.time.on(query.date);
        let appointments = self
            .appointments_until(query.date, requested_end(requested_start, duration))
            .await?;

        if !is_occupied(
            requested_start,
            duration,
            &appointments,
            self.fallback_duration(),
        ) {
            return Ok(SlotCheck::free());
        }

        let alternatives = suggest_alternatives(query.date, duration, &appointments, self.settings);
        debug!(
            "{} {} taken for '{}', suggesting {} alternatives",
            query.date,
            query.time,
            query.service,
            alternatives.len()
        );

        Ok(SlotCheck::taken(alternatives))
    }

    pub async fn resolve_duration(&self, service: &str) -> BookingResult<u32> {
        let services = self.store.get_active_services().await?;
        let catalog = ServiceCatalog::new(services, self.settings.default_duration_minutes);
        Ok(catalog.resolve_duration(service))
    }

    /// Scheduled appointments for the day; the store may return more.
    pub async fn day_appointments(&self, date: NaiveDate) -> BookingResult<Vec<Appointment>> {
        let (_, next_midnight) = day_bounds(date)?;
        self.appointments_until(date, next_midnight).await
    }

    /// Scheduled appointments from the start of `date` up to `until`, and at
    /// least up to the next midnight. A request that runs past midnight passes
    /// its own end so early bookings on the following day are seen.
    pub async fn appointments_until(
        &self,
        date: NaiveDate,
        until: NaiveDateTime,
    ) -> BookingResult<Vec<Appointment>> {
        let (from, next_midnight) = day_bounds(date)?;
        let to = until.max(next_midnight);
        let appointments = self.store.get_scheduled_appointments(from, to).await?;
        Ok(appointments
            .into_iter()
            .filter(Appointment::is_scheduled)
            .collect())
    }

    fn fallback_duration(&self) -> u32 {
        fallback_duration(self.settings)
    }
}

/// Duration substituted for appointments stored without one.
pub fn fallback_duration(settings: &BusinessSettings) -> u32 {
    if settings.default_duration_minutes > 0 {
        settings.default_duration_minutes
    } else {
        MISSING_DURATION_FALLBACK_MINUTES
    }
}

/// End of a request starting at `start`.
pub fn requested_end(start: NaiveDateTime, duration_minutes: u32) -> NaiveDateTime {
    start + Duration::minutes(i64::from(duration_minutes))
}

pub fn day_bounds(date: NaiveDate) -> BookingResult<(NaiveDateTime, NaiveDateTime)> {
    let next = date
        .succ_opt()
        .ok_or_else(|| BookingError::Validation(format!("Date {} is out of range", date)))?;
    Ok((date.and_time(NaiveTime::MIN), next.and_time(NaiveTime::MIN)))
}

pub fn classify(
    date: NaiveDate,
    candidates: &[ClockTime],
    duration_minutes: u32,
    appointments: &[Appointment],
    fallback_duration_minutes: u32,
) -> Vec<Slot> {
    candidates
        .iter()
        .map(|&start| {
            let state = if is_occupied(
                start.on(date),
                duration_minutes,
                appointments,
                fallback_duration_minutes,
            ) {
                SlotState::Occupied
            } else {
                SlotState::Free
            };

            Slot {
                date,
                start,
                duration_minutes,
                state,
            }
        })
        .collect()
}

/// First `max_alternatives` free starts in the fallback window, ascending.
pub fn suggest_alternatives(
    date: NaiveDate,
    duration_minutes: u32,
    appointments: &[Appointment],
    settings: &BusinessSettings,
) -> Vec<ClockTime> {
    let fallback = fallback_duration(settings);

    generate_in_window(
        settings.fallback_window_start,
        settings.fallback_window_end,
        duration_minutes,
        settings.slot_stride_minutes,
    )
    .into_iter()
    .filter(|start| !is_occupied(start.on(date), duration_minutes, appointments, fallback))
    .take(settings.max_alternatives)
    .collect()
}

pub fn assemble_listing(
    date: NaiveDate,
    duration_minutes: u32,
    slots: &[Slot],
    midday: ClockTime,
) -> SlotListing {
    let mut available = Vec::new();
    let mut occupied = Vec::new();
    let mut periods = SlotPeriods::default();

    for slot in slots {
        if slot.is_free() {
            available.push(slot.start);
            if slot.start < midday {
                periods.morning.push(slot.start);
            } else {
                periods.afternoon.push(slot.start);
            }
        } else {
            occupied.push(slot.start);
        }
    }

    SlotListing {
        date,
        duration_minutes,
        closed: false,
        available,
        occupied,
        periods,
    }
}
