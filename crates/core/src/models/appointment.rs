use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clock::ClockTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Cancelled,
    Completed,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::NoShow => "no_show",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            "no_show" => Ok(AppointmentStatus::NoShow),
            other => Err(eyre::eyre!("Unknown appointment status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub service_name: String,
    pub start_time: NaiveDateTime,
    /// Legacy records may lack a duration; conflict checks substitute an
    /// explicit fallback for them.
    pub duration_minutes: Option<u32>,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn is_scheduled(&self) -> bool {
        self.status == AppointmentStatus::Scheduled
    }

    pub fn effective_duration(&self, fallback_minutes: u32) -> u32 {
        self.duration_minutes.unwrap_or(fallback_minutes)
    }

    pub fn end_time(&self, fallback_minutes: u32) -> NaiveDateTime {
        self.start_time + Duration::minutes(i64::from(self.effective_duration(fallback_minutes)))
    }
}

/// Booking request handed to the appointment ledger after validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub client_name: String,
    pub client_phone: Option<String>,
    pub service_name: String,
    pub start_time: NaiveDateTime,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub date: Option<String>,
    pub time: Option<String>,
    pub service: Option<String>,
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub id: Uuid,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub service: String,
    pub date: NaiveDate,
    pub time: ClockTime,
    pub duration_minutes: Option<u32>,
    pub status: AppointmentStatus,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            client_name: appointment.client_name,
            client_phone: appointment.client_phone,
            service: appointment.service_name,
            date: appointment.start_time.date(),
            time: ClockTime::from(appointment.start_time.time()),
            duration_minutes: appointment.duration_minutes,
            status: appointment.status,
        }
    }
}
