use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Open start times for one barber on one date. `slots` is strictly
/// ascending and empty when the barber does not work that day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub barber_id: i64,
    pub date: NaiveDate,
    pub duration_minutes: i64,
    pub slots: Vec<NaiveTime>,
}
