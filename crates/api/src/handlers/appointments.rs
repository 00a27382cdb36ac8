//! # Appointment Handlers
//!
//! Booking, cancellation, and completion of appointments.
//!
//! Booking re-runs the availability computation at write time while holding
//! the barber's booking lock, so a slot that was open at read time but has
//! since been taken surfaces as a 409 conflict rather than a double
//! booking. Confirmation emails are dispatched after the insert commits and
//! never affect the booking's outcome.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use barbershop_core::{
    errors::BookingError,
    models::appointment::{
        AppointmentResponse, AppointmentStatus, CancelAppointmentRequest,
        CreateAppointmentRequest,
    },
};
use barbershop_db::models::{DbAppointment, DbBarber, DbCustomer, DbService};
use barbershop_mailer::EmailMessage;
use chrono::{Duration, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use crate::{
    handlers::availability::{available_slots_for, resolve_services},
    middleware::error_handling::AppError,
    ApiState,
};

fn to_response(db: DbAppointment) -> Result<AppointmentResponse, AppError> {
    let status = AppointmentStatus::from_str(&db.status).map_err(|e| {
        AppError(BookingError::Internal(
            Box::<dyn std::error::Error + Send + Sync>::from(e),
        ))
    })?;

    Ok(AppointmentResponse {
        id: db.id,
        barber_id: db.barber_id,
        customer_id: db.customer_id,
        service_ids: db.service_ids,
        start: db.start_time,
        end: db.end_time,
        total_price: db.total_price,
        status,
        created_at: db.created_at,
    })
}

fn confirmation_messages(
    customer: &DbCustomer,
    barber: &DbBarber,
    services: &[DbService],
    appointment: &DbAppointment,
) -> (EmailMessage, EmailMessage) {
    let service_names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
    let when = appointment.start_time.format("%Y-%m-%d %H:%M");

    let customer_message = EmailMessage {
        to: customer.email.clone(),
        subject: "Your appointment is confirmed".to_string(),
        body: format!(
            "Hi {},\n\nYour appointment with {} on {} is confirmed.\nServices: {}\nTotal: {}\n",
            customer.name,
            barber.name,
            when,
            service_names.join(", "),
            appointment.total_price,
        ),
    };

    let barber_message = EmailMessage {
        to: barber.email.clone(),
        subject: "New appointment booked".to_string(),
        body: format!(
            "{} booked {} on {}.\n",
            customer.name,
            service_names.join(", "),
            when,
        ),
    };

    (customer_message, barber_message)
}

/// Books an appointment.
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments
/// ```
///
/// # Errors
///
/// * `BookingError::Validation` - Unknown service ids
/// * `BookingError::NotFound` - Unknown customer or barber
/// * `BookingError::Conflict` - The requested start time is no longer
///   available; the caller should fetch fresh availability and retry
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    if payload.service_ids.is_empty() {
        return Err(AppError(BookingError::Validation(
            "At least one service id must be provided".to_string(),
        )));
    }

    let services = resolve_services(&state, &payload.service_ids).await?;
    let duration_minutes: i64 = services.iter().map(|s| s.duration_minutes as i64).sum();
    let total_price: Decimal = services.iter().map(|s| s.price).sum();
    // Duration and price come from the de-duplicated services, so the
    // stored ids must be the same set
    let service_ids: Vec<i64> = services.iter().map(|s| s.id).collect();

    let customer =
        barbershop_db::repositories::customer::get_customer_by_id(&state.db_pool, payload.customer_id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| {
                BookingError::NotFound(format!(
                    "Customer with ID {} not found",
                    payload.customer_id
                ))
            })?;

    let barber =
        barbershop_db::repositories::barber::get_barber_by_id(&state.db_pool, payload.barber_id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Barber with ID {} not found", payload.barber_id))
            })?;

    // Serialize check-and-insert per barber so concurrent requests for the
    // same slot resolve into one success and one conflict.
    let _guard = state.booking_locks.acquire(payload.barber_id).await;

    let date = payload.start.date_naive();
    let slots = available_slots_for(&state, payload.barber_id, date, duration_minutes).await?;

    if !slots.contains(&payload.start.time()) {
        return Err(AppError(BookingError::Conflict(format!(
            "Slot {} is no longer available",
            payload.start
        ))));
    }

    let end = payload.start + Duration::minutes(duration_minutes);
    let appointment = barbershop_db::repositories::appointment::create_appointment(
        &state.db_pool,
        payload.barber_id,
        payload.customer_id,
        &service_ids,
        payload.start,
        end,
        total_price,
    )
    .await
    .map_err(BookingError::Database)?;

    drop(_guard);

    // Best-effort confirmation emails; failures are logged in the dispatch
    // task and never reach the caller.
    if let Some(notifier) = &state.mailer {
        let (customer_message, barber_message) =
            confirmation_messages(&customer, &barber, &services, &appointment);
        notifier.notify(customer_message);
        notifier.notify(barber_message);
    }

    Ok(Json(to_response(appointment)?))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment =
        barbershop_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Appointment with ID {} not found", id))
            })?;

    Ok(Json(to_response(appointment)?))
}

/// Cancels a scheduled appointment on behalf of the customer or an admin.
/// The row is kept; only its status changes, which releases the slot for
/// rebooking.
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<CancelAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment =
        barbershop_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Appointment with ID {} not found", id))
            })?;

    let status = AppointmentStatus::from_str(&appointment.status)
        .map_err(BookingError::Validation)?;
    if status != AppointmentStatus::Scheduled {
        return Err(AppError(BookingError::Validation(format!(
            "Only scheduled appointments can be cancelled, current status is {status}"
        ))));
    }

    let updated = barbershop_db::repositories::appointment::update_appointment_status(
        &state.db_pool,
        id,
        payload.cancelled_by.cancelled_status().as_str(),
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(to_response(updated)?))
}

/// Marks a scheduled appointment as completed.
#[axum::debug_handler]
pub async fn complete_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment =
        barbershop_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Appointment with ID {} not found", id))
            })?;

    let status = AppointmentStatus::from_str(&appointment.status)
        .map_err(BookingError::Validation)?;
    if status != AppointmentStatus::Scheduled {
        return Err(AppError(BookingError::Validation(format!(
            "Only scheduled appointments can be completed, current status is {status}"
        ))));
    }

    let updated = barbershop_db::repositories::appointment::update_appointment_status(
        &state.db_pool,
        id,
        AppointmentStatus::Completed.as_str(),
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(to_response(updated)?))
}

/// Query parameters for listing a barber's appointments on one date
#[derive(Debug, Deserialize)]
pub struct ListAppointmentsQuery {
    pub barber_id: i64,
    pub date: NaiveDate,
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListAppointmentsQuery>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    let day_start = query.date.and_time(NaiveTime::MIN).and_utc();
    let day_end = day_start + Duration::days(1);

    let appointments =
        barbershop_db::repositories::appointment::list_appointments_by_barber_between(
            &state.db_pool,
            query.barber_id,
            day_start,
            day_end,
        )
        .await
        .map_err(BookingError::Database)?;

    appointments
        .into_iter()
        .map(to_response)
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

#[axum::debug_handler]
pub async fn list_customer_appointments(
    State(state): State<Arc<ApiState>>,
    Path(customer_id): Path<i64>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    // 404 for an unknown customer, empty list for a known one without bookings
    barbershop_db::repositories::customer::get_customer_by_id(&state.db_pool, customer_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Customer with ID {} not found", customer_id))
        })?;

    let appointments = barbershop_db::repositories::appointment::list_appointments_by_customer(
        &state.db_pool,
        customer_id,
    )
    .await
    .map_err(BookingError::Database)?;

    appointments
        .into_iter()
        .map(to_response)
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}
