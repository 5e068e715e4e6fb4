use chrono::Weekday;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::clock::ClockTime;

/// A recurring opening period on one weekday, e.g. Tuesday 09:00-12:00.
///
/// Several intervals may exist per weekday (morning/afternoon split); they are
/// expected not to overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkInterval {
    pub id: Uuid,
    pub weekday: Weekday,
    pub start: ClockTime,
    pub end: ClockTime,
    pub active: bool,
}

impl WorkInterval {
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }
}
