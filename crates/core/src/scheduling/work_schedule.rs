use chrono::Weekday;
use tracing::warn;

use crate::models::{clock::ClockTime, work_interval::WorkInterval};

/// The active opening intervals of one weekday, sorted by start time.
///
/// An empty schedule means the business is closed that day.
#[derive(Debug, Clone)]
pub struct WorkSchedule {
    weekday: Weekday,
    intervals: Vec<WorkInterval>,
}

impl WorkSchedule {
    pub fn resolve(weekday: Weekday, intervals: Vec<WorkInterval>) -> Self {
        let mut intervals: Vec<WorkInterval> = intervals
            .into_iter()
            .filter(|interval| interval.active && interval.weekday == weekday)
            .filter(|interval| {
                let ok = interval.is_well_formed();
                if !ok {
                    warn!(
                        "Ignoring work interval {} on {:?}: start {} is not before end {}",
                        interval.id, weekday, interval.start, interval.end
                    );
                }
                ok
            })
            .collect();

        // Candidate ordering depends on this
        intervals.sort_by_key(|interval| interval.start);

        Self { weekday, intervals }
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn intervals(&self) -> &[WorkInterval] {
        &self.intervals
    }

    pub fn is_closed(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Whether `[start, start + duration)` lies wholly inside one interval.
    pub fn contains(&self, start: ClockTime, duration_minutes: u32) -> bool {
        let begin = start.minutes_from_midnight();
        let end = begin + duration_minutes;
        self.intervals.iter().any(|interval| {
            interval.start.minutes_from_midnight() <= begin
                && end <= interval.end.minutes_from_midnight()
        })
    }
}
