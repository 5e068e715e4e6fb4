use async_trait::async_trait;
use barberbook_core::{
    models::{
        appointment::{Appointment, NewAppointment},
        service::Service,
        settings::BusinessSettings,
        work_interval::WorkInterval,
    },
    store::{AppointmentLedger, BookingOutcome, SchedulingStore},
};
use chrono::{NaiveDateTime, Weekday};
use mockall::mock;
use uuid::Uuid;

// Mock collaborators for testing
mock! {
    pub Store {}

    #[async_trait]
    impl SchedulingStore for Store {
        async fn get_business_settings(&self) -> eyre::Result<Option<BusinessSettings>>;

        async fn get_active_services(&self) -> eyre::Result<Vec<Service>>;

        async fn get_active_work_intervals(
            &self,
            weekday: Weekday,
        ) -> eyre::Result<Vec<WorkInterval>>;

        async fn get_scheduled_appointments(
            &self,
            from: NaiveDateTime,
            to: NaiveDateTime,
        ) -> eyre::Result<Vec<Appointment>>;
    }
}

mock! {
    pub Ledger {}

    #[async_trait]
    impl AppointmentLedger for Ledger {
        async fn book_appointment(
            &self,
            appointment: NewAppointment,
            fallback_duration_minutes: u32,
        ) -> eyre::Result<BookingOutcome>;

        async fn cancel_appointment(&self, id: Uuid) -> eyre::Result<Option<Appointment>>;

        async fn complete_appointment(&self, id: Uuid) -> eyre::Result<Option<Appointment>>;
    }
}
