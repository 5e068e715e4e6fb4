//! Narrow contracts the engine and the booking flow use to reach persistence.

use async_trait::async_trait;
use chrono::{NaiveDateTime, Weekday};
use eyre::Result;
use uuid::Uuid;

use crate::models::{
    appointment::{Appointment, NewAppointment},
    service::Service,
    settings::BusinessSettings,
    work_interval::WorkInterval,
};

/// Read access to configuration and the appointment ledger.
///
/// Implementations must not cache across calls; each availability query
/// reads a fresh snapshot.
#[async_trait]
pub trait SchedulingStore: Send + Sync {
    /// `None` when the business has never been configured.
    async fn get_business_settings(&self) -> Result<Option<BusinessSettings>>;

    async fn get_active_services(&self) -> Result<Vec<Service>>;

    async fn get_active_work_intervals(&self, weekday: Weekday) -> Result<Vec<WorkInterval>>;

    /// Scheduled appointments that may overlap `[from, to)`. Returning extra
    /// rows is allowed; the engine applies the overlap test itself.
    async fn get_scheduled_appointments(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Appointment>>;
}

#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Booked(Appointment),
    SlotTaken,
}

/// Write side of the ledger used by the booking flow.
///
/// `book_appointment` must re-run the conflict check and insert under a single
/// serialized transaction; the availability engine gives no such guarantee.
#[async_trait]
pub trait AppointmentLedger: Send + Sync {
    async fn book_appointment(
        &self,
        appointment: NewAppointment,
        fallback_duration_minutes: u32,
    ) -> Result<BookingOutcome>;

    /// Moves a scheduled appointment to `cancelled`. `None` if no scheduled
    /// appointment has this id.
    async fn cancel_appointment(&self, id: Uuid) -> Result<Option<Appointment>>;

    /// Moves a scheduled appointment to `completed`.
    async fn complete_appointment(&self, id: Uuid) -> Result<Option<Appointment>>;
}
