use serde::{Deserialize, Serialize};

use super::clock::ClockTime;
use crate::{
    errors::{BookingError, BookingResult},
    scheduling::slot_generator::DEFAULT_STRIDE_MINUTES,
};

/// Business-wide scheduling configuration.
///
/// Loaded once per request from the store and passed explicitly into every
/// engine call; nothing in the engine caches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessSettings {
    /// Duration used for unknown services and for appointments without one.
    pub default_duration_minutes: u32,
    /// Spacing of the public slot grid.
    pub slot_stride_minutes: u32,
    /// Free slots starting before this time are listed under `morning`.
    pub midday: ClockTime,
    /// Range scanned for alternatives when a requested slot is taken.
    pub fallback_window_start: ClockTime,
    pub fallback_window_end: ClockTime,
    pub max_alternatives: usize,
}

fn on_the_hour(hour: u32) -> ClockTime {
    ClockTime::from_hm(hour, 0).expect("hour literal below 24")
}

impl Default for BusinessSettings {
    fn default() -> Self {
        Self {
            default_duration_minutes: 30,
            slot_stride_minutes: DEFAULT_STRIDE_MINUTES,
            midday: on_the_hour(12),
            fallback_window_start: on_the_hour(9),
            fallback_window_end: on_the_hour(18),
            max_alternatives: 5,
        }
    }
}

impl BusinessSettings {
    pub fn validate(&self) -> BookingResult<()> {
        if self.default_duration_minutes == 0 {
            return Err(BookingError::Validation(
                "default_duration_minutes must be positive".to_string(),
            ));
        }
        if self.slot_stride_minutes == 0 {
            return Err(BookingError::Validation(
                "slot_stride_minutes must be positive".to_string(),
            ));
        }
        if self.fallback_window_start >= self.fallback_window_end {
            return Err(BookingError::Validation(format!(
                "fallback window {}-{} is empty",
                self.fallback_window_start, self.fallback_window_end
            )));
        }
        Ok(())
    }
}
