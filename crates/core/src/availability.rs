//! # Slot Availability Calculator
//!
//! Derives the open appointment start times for one barber on one date from
//! three inputs: the working hours for that weekday, the break window, and
//! the busy intervals of existing non-cancelled appointments.
//!
//! ## Algorithm
//!
//! Candidate start times are scanned from the start of the working window in
//! fixed increments (15 minutes by default) while the candidate is before
//! the end of the window. A candidate is emitted when all of the following
//! hold:
//!
//! 1. The candidate's interval `[start, start + duration)` ends at or before
//!    the end of the working window.
//! 2. The interval does not intersect the break window.
//! 3. The interval does not intersect any busy interval.
//!
//! All intersection tests use half-open semantics
//! (`a.start < b.end && a.end > b.start`), so an appointment ending exactly
//! when another begins does not count as an overlap and back-to-back
//! bookings are allowed.
//!
//! The scan is monotonic, so the output is strictly ascending. The function
//! is pure: same inputs, same output, no side effects. "Nothing fits" is a
//! normal empty result, never an error.

use chrono::{Duration, NaiveTime};

/// Scan step between candidate start times, in minutes. Kept configurable
/// through the API layer; changing it changes which slot boundaries are
/// emitted, so it must stay aligned with any appointments already stored.
pub const DEFAULT_SLOT_GRANULARITY_MINUTES: i64 = 15;

/// Working hours and break window for a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub break_start: NaiveTime,
    pub break_end: NaiveTime,
}

/// Time-of-day range occupied by an existing appointment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusyInterval {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Half-open interval intersection: `[a_start, a_end)` vs `[b_start, b_end)`.
fn overlaps(a_start: NaiveTime, a_end: NaiveTime, b_start: NaiveTime, b_end: NaiveTime) -> bool {
    a_start < b_end && a_end > b_start
}

/// Computes the ascending list of start times at which a booking of
/// `duration_minutes` fits inside `day` without touching the break window
/// or any of the `busy` intervals.
pub fn compute_available_slots(
    day: &DayHours,
    busy: &[BusyInterval],
    duration_minutes: i64,
    granularity_minutes: i64,
) -> Vec<NaiveTime> {
    let duration = Duration::minutes(duration_minutes);
    let step = Duration::minutes(granularity_minutes.max(1));

    let mut slots = Vec::new();
    let mut candidate = day.start;

    while candidate < day.end {
        // NaiveTime arithmetic wraps at midnight; a wrapped end lies past
        // the end of the day by definition.
        let (candidate_end, wrap) = candidate.overflowing_add_signed(duration);

        let fits = wrap == 0
            && candidate_end <= day.end
            && !overlaps(candidate, candidate_end, day.break_start, day.break_end)
            && !busy
                .iter()
                .any(|b| overlaps(candidate, candidate_end, b.start, b.end));

        if fits {
            slots.push(candidate);
        }

        let (next, wrap) = candidate.overflowing_add_signed(step);
        if wrap != 0 {
            break;
        }
        candidate = next;
    }

    slots
}
