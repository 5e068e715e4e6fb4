use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::clock::ClockTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    Free,
    Occupied,
}

/// A classified candidate start time. Derived per query, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub start: ClockTime,
    pub duration_minutes: u32,
    pub state: SlotState,
}

impl Slot {
    pub fn is_free(&self) -> bool {
        self.state == SlotState::Free
    }
}

/// Free slots grouped for display; carries no meaning beyond grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPeriods {
    pub morning: Vec<ClockTime>,
    pub afternoon: Vec<ClockTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotListing {
    pub date: NaiveDate,
    pub duration_minutes: u32,
    pub closed: bool,
    pub available: Vec<ClockTime>,
    pub occupied: Vec<ClockTime>,
    pub periods: SlotPeriods,
}

impl SlotListing {
    pub fn closed(date: NaiveDate) -> Self {
        Self {
            date,
            duration_minutes: 0,
            closed: true,
            available: Vec::new(),
            occupied: Vec::new(),
            periods: SlotPeriods::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCheck {
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<ClockTime>>,
}

impl SlotCheck {
    pub fn free() -> Self {
        Self {
            available: true,
            alternatives: None,
        }
    }

    pub fn taken(alternatives: Vec<ClockTime>) -> Self {
        Self {
            available: false,
            alternatives: Some(alternatives),
        }
    }
}
