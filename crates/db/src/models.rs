use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc, Weekday};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use barberbook_core::models::{
    appointment::Appointment, clock::ClockTime, service::Service, settings::BusinessSettings,
    work_interval::WorkInterval,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBusinessSettings {
    pub default_duration_minutes: i32,
    pub slot_stride_minutes: i32,
    pub midday: NaiveTime,
    pub fallback_window_start: NaiveTime,
    pub fallback_window_end: NaiveTime,
    pub max_alternatives: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWorkInterval {
    pub id: Uuid,
    /// 0 = Monday .. 6 = Sunday
    pub weekday: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub service_name: String,
    pub start_time: NaiveDateTime,
    pub duration_minutes: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub fn weekday_to_db(weekday: Weekday) -> i16 {
    weekday.num_days_from_monday() as i16
}

pub fn weekday_from_db(value: i16) -> Result<Weekday> {
    match value {
        0 => Ok(Weekday::Mon),
        1 => Ok(Weekday::Tue),
        2 => Ok(Weekday::Wed),
        3 => Ok(Weekday::Thu),
        4 => Ok(Weekday::Fri),
        5 => Ok(Weekday::Sat),
        6 => Ok(Weekday::Sun),
        other => Err(eyre!("Weekday column out of range: {}", other)),
    }
}

fn non_negative(column: &str, value: i32) -> Result<u32> {
    u32::try_from(value).map_err(|_| eyre!("{} must not be negative, got {}", column, value))
}

impl TryFrom<DbBusinessSettings> for BusinessSettings {
    type Error = eyre::Report;

    fn try_from(row: DbBusinessSettings) -> Result<Self> {
        let settings = BusinessSettings {
            default_duration_minutes: non_negative(
                "default_duration_minutes",
                row.default_duration_minutes,
            )?,
            slot_stride_minutes: non_negative("slot_stride_minutes", row.slot_stride_minutes)?,
            midday: ClockTime::from(row.midday),
            fallback_window_start: ClockTime::from(row.fallback_window_start),
            fallback_window_end: ClockTime::from(row.fallback_window_end),
            max_alternatives: non_negative("max_alternatives", row.max_alternatives)? as usize,
        };

        settings
            .validate()
            .map_err(|e| eyre!("Stored business settings are invalid: {}", e))?;

        Ok(settings)
    }
}

impl TryFrom<DbService> for Service {
    type Error = eyre::Report;

    fn try_from(row: DbService) -> Result<Self> {
        Ok(Service {
            id: row.id,
            name: row.name,
            duration_minutes: non_negative("duration_minutes", row.duration_minutes)?,
            active: row.active,
        })
    }
}

impl TryFrom<DbWorkInterval> for WorkInterval {
    type Error = eyre::Report;

    fn try_from(row: DbWorkInterval) -> Result<Self> {
        Ok(WorkInterval {
            id: row.id,
            weekday: weekday_from_db(row.weekday)?,
            start: ClockTime::from(row.start_time),
            end: ClockTime::from(row.end_time),
            active: row.active,
        })
    }
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = eyre::Report;

    fn try_from(row: DbAppointment) -> Result<Self> {
        let duration_minutes = row
            .duration_minutes
            .map(|minutes| non_negative("duration_minutes", minutes))
            .transpose()?
            // Zero-length legacy rows behave like missing durations
            .filter(|minutes| *minutes > 0);

        Ok(Appointment {
            id: row.id,
            client_name: row.client_name,
            client_phone: row.client_phone,
            service_name: row.service_name,
            start_time: row.start_time,
            duration_minutes,
            status: row.status.parse()?,
        })
    }
}
