//! PostgreSQL implementation of the engine's collaborator traits.

use async_trait::async_trait;
use barberbook_core::{
    models::{
        appointment::{Appointment, AppointmentStatus, NewAppointment},
        service::Service,
        settings::BusinessSettings,
        work_interval::WorkInterval,
    },
    store::{AppointmentLedger, BookingOutcome, SchedulingStore},
};
use chrono::{NaiveDateTime, Weekday};
use eyre::Result;
use uuid::Uuid;

use crate::{
    DbPool,
    models::weekday_to_db,
    repositories::{appointment, service, settings, work_interval},
};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = eyre::Report>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[async_trait]
impl SchedulingStore for PgStore {
    async fn get_business_settings(&self) -> Result<Option<BusinessSettings>> {
        settings::get_business_settings(&self.pool)
            .await?
            .map(BusinessSettings::try_from)
            .transpose()
    }

    async fn get_active_services(&self) -> Result<Vec<Service>> {
        convert_all(service::get_active_services(&self.pool).await?)
    }

    async fn get_active_work_intervals(&self, weekday: Weekday) -> Result<Vec<WorkInterval>> {
        convert_all(
            work_interval::get_active_work_intervals(&self.pool, weekday_to_db(weekday)).await?,
        )
    }

    async fn get_scheduled_appointments(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Appointment>> {
        convert_all(appointment::get_scheduled_appointments(&self.pool, from, to).await?)
    }
}

#[async_trait]
impl AppointmentLedger for PgStore {
    async fn book_appointment(
        &self,
        new: NewAppointment,
        fallback_duration_minutes: u32,
    ) -> Result<BookingOutcome> {
        match appointment::book_appointment(&self.pool, &new, fallback_duration_minutes).await? {
            Some(row) => Ok(BookingOutcome::Booked(Appointment::try_from(row)?)),
            None => Ok(BookingOutcome::SlotTaken),
        }
    }

    async fn cancel_appointment(&self, id: Uuid) -> Result<Option<Appointment>> {
        appointment::transition_status(
            &self.pool,
            id,
            AppointmentStatus::Scheduled,
            AppointmentStatus::Cancelled,
        )
        .await?
        .map(Appointment::try_from)
        .transpose()
    }

    async fn complete_appointment(&self, id: Uuid) -> Result<Option<Appointment>> {
        appointment::transition_status(
            &self.pool,
            id,
            AppointmentStatus::Scheduled,
            AppointmentStatus::Completed,
        )
        .await?
        .map(Appointment::try_from)
        .transpose()
    }
}
