#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use barberbook_core::{
    models::{
        appointment::{Appointment, AppointmentStatus},
        clock::ClockTime,
        service::Service,
        settings::BusinessSettings,
        work_interval::WorkInterval,
    },
    store::SchedulingStore,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

pub fn clock(raw: &str) -> ClockTime {
    raw.parse().expect("test clock time")
}

pub fn clocks(raw: &[&str]) -> Vec<ClockTime> {
    raw.iter().map(|r| clock(r)).collect()
}

/// 2024-06-03 is a Monday.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

pub fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()
}

pub fn at(date: NaiveDate, time: &str) -> NaiveDateTime {
    clock(time).on(date)
}

pub fn interval(weekday: Weekday, start: &str, end: &str) -> WorkInterval {
    WorkInterval {
        id: Uuid::new_v4(),
        weekday,
        start: clock(start),
        end: clock(end),
        active: true,
    }
}

pub fn service(name: &str, duration_minutes: u32) -> Service {
    Service {
        id: Uuid::new_v4(),
        name: name.to_string(),
        duration_minutes,
        active: true,
    }
}

pub fn booking(date: NaiveDate, time: &str, duration_minutes: Option<u32>) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        client_name: "Client".to_string(),
        client_phone: None,
        service_name: "Corte".to_string(),
        start_time: at(date, time),
        duration_minutes,
        status: AppointmentStatus::Scheduled,
    }
}

/// In-memory store that counts reads so tests can assert short-circuits.
#[derive(Default)]
pub struct MemoryStore {
    pub settings: Option<BusinessSettings>,
    pub services: Vec<Service>,
    pub intervals: Vec<WorkInterval>,
    pub appointments: Vec<Appointment>,
    pub fail_appointments: bool,
    pub service_reads: AtomicUsize,
    pub appointment_reads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            settings: Some(BusinessSettings::default()),
            ..Self::default()
        }
    }

    pub fn with_interval(mut self, weekday: Weekday, start: &str, end: &str) -> Self {
        self.intervals.push(interval(weekday, start, end));
        self
    }

    pub fn with_service(mut self, name: &str, duration_minutes: u32) -> Self {
        self.services.push(service(name, duration_minutes));
        self
    }

    pub fn with_booking(mut self, appointment: Appointment) -> Self {
        self.appointments.push(appointment);
        self
    }
}

#[async_trait]
impl SchedulingStore for MemoryStore {
    async fn get_business_settings(&self) -> eyre::Result<Option<BusinessSettings>> {
        Ok(self.settings.clone())
    }

    async fn get_active_services(&self) -> eyre::Result<Vec<Service>> {
        self.service_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.services.iter().filter(|s| s.active).cloned().collect())
    }

    async fn get_active_work_intervals(&self, weekday: Weekday) -> eyre::Result<Vec<WorkInterval>> {
        Ok(self
            .intervals
            .iter()
            .filter(|i| i.active && i.weekday == weekday)
            .cloned()
            .collect())
    }

    async fn get_scheduled_appointments(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> eyre::Result<Vec<Appointment>> {
        self.appointment_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_appointments {
            return Err(eyre::eyre!("ledger unavailable"));
        }
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.start_time < to && a.start_time >= from - chrono::Duration::days(1))
            .cloned()
            .collect())
    }
}
