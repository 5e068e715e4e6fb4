//! Candidate start times on a fixed public grid.
//!
//! The stride is independent of the service duration so client-visible times
//! stay on the same grid (every half hour by default) whatever is booked.

use crate::models::{clock::ClockTime, work_interval::WorkInterval};

pub const DEFAULT_STRIDE_MINUTES: u32 = 30;

/// Candidates for every interval, concatenated in interval order.
///
/// Intervals are expected sorted and non-overlapping, which makes the result
/// ascending.
pub fn generate(
    intervals: &[WorkInterval],
    duration_minutes: u32,
    stride_minutes: u32,
) -> Vec<ClockTime> {
    intervals
        .iter()
        .flat_map(|interval| {
            generate_in_window(interval.start, interval.end, duration_minutes, stride_minutes)
        })
        .collect()
}

/// Starts at `window_start` and steps by `stride_minutes` while the whole
/// service still ends at or before `window_end`.
pub fn generate_in_window(
    window_start: ClockTime,
    window_end: ClockTime,
    duration_minutes: u32,
    stride_minutes: u32,
) -> Vec<ClockTime> {
    if duration_minutes == 0 || stride_minutes == 0 {
        return Vec::new();
    }

    let end = window_end.minutes_from_midnight();
    let mut start = window_start.minutes_from_midnight();
    let mut candidates = Vec::new();

    while start + duration_minutes <= end {
        match ClockTime::from_minutes(start) {
            Some(time) => candidates.push(time),
            None => break,
        }
        start += stride_minutes;
    }

    candidates
}
