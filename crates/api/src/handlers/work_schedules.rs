//! # Work Schedule Handlers
//!
//! Reads and batch-updates a barber's weekly working hours. The update is
//! all-or-nothing: every entry is validated before any write, and the
//! reconciliation (upsert listed weekdays, delete absent ones) runs in a
//! single transaction.

use axum::{
    extract::{Path, State},
    Json,
};
use barbershop_core::{
    errors::BookingError,
    models::work_schedule::{UpdateWorkScheduleRequest, WorkDayEntry, WorkScheduleResponse},
};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

async fn ensure_barber_exists(state: &ApiState, barber_id: i64) -> Result<(), AppError> {
    barbershop_db::repositories::barber::get_barber_by_id(&state.db_pool, barber_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Barber with ID {} not found", barber_id)))?;
    Ok(())
}

#[axum::debug_handler]
pub async fn get_work_schedule(
    State(state): State<Arc<ApiState>>,
    Path(barber_id): Path<i64>,
) -> Result<Json<WorkScheduleResponse>, AppError> {
    ensure_barber_exists(&state, barber_id).await?;

    let rows = barbershop_db::repositories::work_schedule::get_week(&state.db_pool, barber_id)
        .await
        .map_err(BookingError::Database)?;

    let days = rows
        .into_iter()
        .map(|row| {
            // Range-guarded by the weekday CHECK constraint
            let weekday = u8::try_from(row.weekday).map_err(|_| {
                BookingError::Internal(Box::<dyn std::error::Error + Send + Sync>::from(
                    format!("Stored weekday {} out of range", row.weekday),
                ))
            })?;
            Ok(WorkDayEntry {
                weekday,
                start_time: row.start_time,
                end_time: row.end_time,
                break_start: row.break_start,
                break_end: row.break_end,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(Json(WorkScheduleResponse { barber_id, days }))
}

/// Replaces a barber's full weekly schedule.
///
/// # Endpoint
///
/// ```text
/// PUT /api/barbers/:id/schedule
/// ```
///
/// Weekdays absent from the payload become non-working days and their rows
/// are deleted. Any invalid entry fails the whole batch with no partial
/// writes.
#[axum::debug_handler]
pub async fn update_work_schedule(
    State(state): State<Arc<ApiState>>,
    Path(barber_id): Path<i64>,
    Json(payload): Json<UpdateWorkScheduleRequest>,
) -> Result<Json<WorkScheduleResponse>, AppError> {
    ensure_barber_exists(&state, barber_id).await?;

    let mut seen = BTreeSet::new();
    for entry in &payload.days {
        entry
            .validate()
            .map_err(|e| AppError(BookingError::Validation(e)))?;
        if !seen.insert(entry.weekday) {
            return Err(AppError(BookingError::Validation(format!(
                "Duplicate entry for weekday {}",
                entry.weekday
            ))));
        }
    }

    barbershop_db::repositories::work_schedule::replace_week(
        &state.db_pool,
        barber_id,
        &payload.days,
    )
    .await
    .map_err(BookingError::Database)?;

    get_work_schedule(State(state), Path(barber_id)).await
}
