//! Input validation for availability queries.
//!
//! Everything here runs before any store read so malformed requests are
//! rejected without touching persistence.

use chrono::NaiveDate;

use crate::{
    errors::{BookingError, BookingResult},
    models::clock::ClockTime,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotListingQuery {
    pub date: NaiveDate,
    pub service: String,
}

impl SlotListingQuery {
    pub fn parse(date: Option<&str>, service: Option<&str>) -> BookingResult<Self> {
        Ok(Self {
            date: parse_date(date)?,
            service: parse_service(service)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCheckQuery {
    pub date: NaiveDate,
    pub time: ClockTime,
    pub service: String,
}

impl SlotCheckQuery {
    pub fn parse(
        date: Option<&str>,
        time: Option<&str>,
        service: Option<&str>,
    ) -> BookingResult<Self> {
        Ok(Self {
            date: parse_date(date)?,
            time: parse_time(time)?,
            service: parse_service(service)?,
        })
    }
}

pub fn parse_date(raw: Option<&str>) -> BookingResult<NaiveDate> {
    let raw = required("date", raw)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        BookingError::Validation(format!("Invalid date '{}'. Expected YYYY-MM-DD", raw))
    })
}

pub fn parse_time(raw: Option<&str>) -> BookingResult<ClockTime> {
    required("time", raw)?.parse()
}

pub fn parse_service(raw: Option<&str>) -> BookingResult<String> {
    required("service", raw).map(str::to_string)
}

/// Trimmed, non-empty value of a mandatory field.
pub fn required<'a>(field: &str, raw: Option<&'a str>) -> BookingResult<&'a str> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(BookingError::Validation(format!("{} is required", field))),
    }
}
