//! # Availability Handlers
//!
//! Computes the open appointment slots for one barber on one date. The
//! pure interval scan lives in `barbershop_core::availability`; this module
//! does the data loading and validation around it:
//!
//! 1. Resolve the requested service ids against the catalog and sum their
//!    durations — any unknown id is a validation failure, not a silent skip.
//! 2. Load the barber's work-schedule row for the date's weekday — no row
//!    means the barber does not work that day, which is an empty result,
//!    not an error.
//! 3. Load the barber's non-cancelled appointments whose start falls on
//!    that date and turn them into busy intervals.
//! 4. Scan candidate start times at the configured granularity and keep
//!    those whose interval fits the working window, misses the break, and
//!    misses every busy interval.
//!
//! The booking handler re-runs the same computation at write time through
//! `available_slots_for`, so read-time and write-time availability can
//! never drift apart.

use axum::{
    extract::{Query, State},
    Json,
};
use barbershop_core::{
    availability::{compute_available_slots, BusyInterval, DayHours},
    errors::BookingError,
    models::availability::AvailabilityResponse,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the availability endpoint
///
/// # Fields
///
/// * `barber_id` - The barber to look up
/// * `service_ids` - Comma-separated list of service ids
/// * `date` - Target calendar date (YYYY-MM-DD)
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// The barber whose calendar is being queried
    pub barber_id: i64,

    /// Comma-separated service ids making up the requested booking
    pub service_ids: String,

    /// Target date, no time component
    pub date: NaiveDate,
}

/// Parses a comma-separated id list into integers.
///
/// An empty list or a non-numeric entry is a validation failure.
pub fn parse_service_ids(raw: &str) -> Result<Vec<i64>, AppError> {
    let ids: Result<Vec<i64>, _> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<i64>)
        .collect();

    let ids = ids.map_err(|_| {
        AppError(BookingError::Validation(
            "Invalid service id format. Must be comma-separated integers".to_string(),
        ))
    })?;

    if ids.is_empty() {
        return Err(AppError(BookingError::Validation(
            "At least one service id must be provided".to_string(),
        )));
    }

    Ok(ids)
}

/// Resolves service ids against the catalog. Fails with a validation error
/// when any requested id does not exist; duplicates count once.
pub async fn resolve_services(
    state: &ApiState,
    service_ids: &[i64],
) -> Result<Vec<barbershop_db::models::DbService>, AppError> {
    let distinct: BTreeSet<i64> = service_ids.iter().copied().collect();
    let distinct: Vec<i64> = distinct.into_iter().collect();

    let services =
        barbershop_db::repositories::service::get_services_by_ids(&state.db_pool, &distinct)
            .await
            .map_err(BookingError::Database)?;

    if services.len() < distinct.len() {
        return Err(AppError(BookingError::Validation(
            "One or more service ids do not exist".to_string(),
        )));
    }

    Ok(services)
}

/// Total booking duration in minutes for the requested services.
pub async fn resolve_total_duration(
    state: &ApiState,
    service_ids: &[i64],
) -> Result<i64, AppError> {
    let services = resolve_services(state, service_ids).await?;
    Ok(services.iter().map(|s| s.duration_minutes as i64).sum())
}

/// Computes the open slots for a booking of `duration_minutes` with the
/// given barber on `date`.
///
/// Absent work schedule for the weekday degrades to an empty list; only
/// data-access failures are errors.
pub async fn available_slots_for(
    state: &ApiState,
    barber_id: i64,
    date: NaiveDate,
    duration_minutes: i64,
) -> Result<Vec<NaiveTime>, AppError> {
    // Weekday numbering matches the work_schedules table: Monday = 0
    let weekday = chrono::Datelike::weekday(&date).num_days_from_monday() as i16;

    let schedule = barbershop_db::repositories::work_schedule::get_work_schedule_for_weekday(
        &state.db_pool,
        barber_id,
        weekday,
    )
    .await
    .map_err(BookingError::Database)?;

    let Some(schedule) = schedule else {
        // Non-working day: nothing available, not an error
        return Ok(Vec::new());
    };

    let day_start: DateTime<Utc> = date.and_time(NaiveTime::MIN).and_utc();
    let day_end = day_start + Duration::days(1);

    let appointments = barbershop_db::repositories::appointment::get_active_appointments_between(
        &state.db_pool,
        barber_id,
        day_start,
        day_end,
    )
    .await
    .map_err(BookingError::Database)?;

    let busy: Vec<BusyInterval> = appointments
        .iter()
        .map(|a| BusyInterval {
            start: a.start_time.time(),
            end: a.end_time.time(),
        })
        .collect();

    let day = DayHours {
        start: schedule.start_time,
        end: schedule.end_time,
        break_start: schedule.break_start,
        break_end: schedule.break_end,
    };

    Ok(compute_available_slots(
        &day,
        &busy,
        duration_minutes,
        state.slot_granularity_minutes,
    ))
}

/// Lists the open start times for a booking of the requested services.
///
/// # Endpoint
///
/// ```text
/// GET /api/availability?barber_id=1&service_ids=2,5&date=2026-09-01
/// ```
///
/// # Errors
///
/// * `BookingError::Validation` - Malformed or unknown service ids
/// * `BookingError::Database` - Database error
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let service_ids = parse_service_ids(&query.service_ids)?;
    let duration_minutes = resolve_total_duration(&state, &service_ids).await?;

    let slots = available_slots_for(&state, query.barber_id, query.date, duration_minutes).await?;

    Ok(Json(AvailabilityResponse {
        barber_id: query.barber_id,
        date: query.date,
        duration_minutes,
        slots,
    }))
}
