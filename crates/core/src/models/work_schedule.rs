use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Working hours for one weekday. Weekdays are numbered 0–6 with Monday = 0,
/// matching `chrono::Weekday::num_days_from_monday`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkDayEntry {
    pub weekday: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub break_start: NaiveTime,
    pub break_end: NaiveTime,
}

impl WorkDayEntry {
    /// Checks the per-entry invariants of the batch schedule update:
    /// a valid weekday number, start before end, and break start before
    /// break end.
    pub fn validate(&self) -> Result<(), String> {
        if self.weekday > 6 {
            return Err(format!("weekday must be 0-6, got {}", self.weekday));
        }
        if self.start_time >= self.end_time {
            return Err(format!(
                "start time {} must be before end time {}",
                self.start_time, self.end_time
            ));
        }
        if self.break_start >= self.break_end {
            return Err(format!(
                "break start {} must be before break end {}",
                self.break_start, self.break_end
            ));
        }
        Ok(())
    }
}

/// Full weekly schedule for a barber. Weekdays absent from `days` are
/// non-working days; the batch update deletes their rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWorkScheduleRequest {
    pub days: Vec<WorkDayEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkScheduleResponse {
    pub barber_id: i64,
    pub days: Vec<WorkDayEntry>,
}
