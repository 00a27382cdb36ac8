use barbershop_api::middleware::error_handling::AppError;
use barbershop_core::{
    availability::{compute_available_slots, BusyInterval, DayHours},
    errors::BookingError,
    models::appointment::{AppointmentStatus, CancelParty},
};
use barbershop_db::models::{DbAppointment, DbBarber, DbCustomer, DbService, DbWorkSchedule};
use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use mockall::predicate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::test_utils::TestContext;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn service(id: i64, duration_minutes: i32, price: Decimal) -> DbService {
    DbService {
        id,
        name: format!("Service {id}"),
        price,
        duration_minutes,
        created_at: Utc::now(),
    }
}

fn customer(id: i64) -> DbCustomer {
    DbCustomer {
        id,
        email: format!("customer{id}@example.com"),
        name: "Test Customer".to_string(),
        password_hash: "$argon2id$fake".to_string(),
        created_at: Utc::now(),
    }
}

fn barber(id: i64) -> DbBarber {
    DbBarber {
        id,
        name: "Test Barber".to_string(),
        email: format!("barber{id}@example.com"),
        bio: None,
        created_at: Utc::now(),
    }
}

fn schedule_row(barber_id: i64, weekday: i16) -> DbWorkSchedule {
    DbWorkSchedule {
        barber_id,
        weekday,
        start_time: t(9, 0),
        end_time: t(17, 0),
        break_start: t(12, 0),
        break_end: t(13, 0),
        created_at: Utc::now(),
    }
}

fn appointment_row(id: i64, barber_id: i64, start: DateTime<Utc>, status: &str) -> DbAppointment {
    DbAppointment {
        id,
        barber_id,
        customer_id: 1,
        service_ids: vec![1],
        start_time: start,
        end_time: start + Duration::minutes(30),
        total_price: Decimal::new(2000, 2),
        status: status.to_string(),
        created_at: Utc::now(),
    }
}

// Mirrors the booking handler's write path: resolve services, check the
// customer and barber exist, recompute availability for the requested
// date, and either insert or report a conflict.
async fn book_wrapper(
    ctx: &mut TestContext,
    barber_id: i64,
    customer_id: i64,
    service_ids: Vec<i64>,
    start: DateTime<Utc>,
) -> Result<DbAppointment, AppError> {
    if service_ids.is_empty() {
        return Err(AppError(BookingError::Validation(
            "At least one service id must be provided".to_string(),
        )));
    }

    let distinct: Vec<i64> = service_ids
        .iter()
        .copied()
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();
    let services = ctx.service_repo.get_services_by_ids(distinct.clone()).await?;
    if services.len() < distinct.len() {
        return Err(AppError(BookingError::Validation(
            "One or more service ids do not exist".to_string(),
        )));
    }
    let duration: i64 = services.iter().map(|s| s.duration_minutes as i64).sum();
    let total_price: Decimal = services.iter().map(|s| s.price).sum();
    let stored_service_ids: Vec<i64> = services.iter().map(|s| s.id).collect();

    ctx.customer_repo
        .get_customer_by_id(customer_id)
        .await?
        .ok_or_else(|| {
            AppError(BookingError::NotFound(format!(
                "Customer with ID {customer_id} not found"
            )))
        })?;
    ctx.barber_repo
        .get_barber_by_id(barber_id)
        .await?
        .ok_or_else(|| {
            AppError(BookingError::NotFound(format!(
                "Barber with ID {barber_id} not found"
            )))
        })?;

    let date = start.date_naive();
    let weekday = date.weekday().num_days_from_monday() as i16;
    let schedule = ctx
        .work_schedule_repo
        .get_work_schedule_for_weekday(barber_id, weekday)
        .await?;

    let slots = match schedule {
        Some(schedule) => {
            let day_start = date.and_time(NaiveTime::MIN).and_utc();
            let appointments = ctx
                .appointment_repo
                .get_active_appointments_between(barber_id, day_start, day_start + Duration::days(1))
                .await?;
            let busy: Vec<BusyInterval> = appointments
                .iter()
                .map(|a| BusyInterval {
                    start: a.start_time.time(),
                    end: a.end_time.time(),
                })
                .collect();
            compute_available_slots(
                &DayHours {
                    start: schedule.start_time,
                    end: schedule.end_time,
                    break_start: schedule.break_start,
                    break_end: schedule.break_end,
                },
                &busy,
                duration,
                15,
            )
        }
        None => Vec::new(),
    };

    if !slots.contains(&start.time()) {
        return Err(AppError(BookingError::Conflict(format!(
            "Slot {start} is no longer available"
        ))));
    }

    let appointment = ctx
        .appointment_repo
        .create_appointment(
            barber_id,
            customer_id,
            stored_service_ids,
            start,
            start + Duration::minutes(duration),
            total_price,
        )
        .await?;

    Ok(appointment)
}

// Mirrors the cancellation handler: only scheduled appointments may move
// to a cancelled status.
async fn cancel_wrapper(
    ctx: &mut TestContext,
    id: i64,
    party: CancelParty,
) -> Result<DbAppointment, AppError> {
    let appointment = ctx
        .appointment_repo
        .get_appointment_by_id(id)
        .await?
        .ok_or_else(|| {
            AppError(BookingError::NotFound(format!(
                "Appointment with ID {id} not found"
            )))
        })?;

    let status = AppointmentStatus::from_str(&appointment.status)
        .map_err(BookingError::Validation)?;
    if status != AppointmentStatus::Scheduled {
        return Err(AppError(BookingError::Validation(format!(
            "Only scheduled appointments can be cancelled, current status is {status}"
        ))));
    }

    let updated = ctx
        .appointment_repo
        .update_appointment_status(id, party.cancelled_status().as_str())
        .await?;
    Ok(updated)
}

fn booking_mocks(ctx: &mut TestContext) {
    ctx.service_repo
        .expect_get_services_by_ids()
        .times(1)
        .returning(|_| Ok(vec![service(1, 30, Decimal::new(2500, 2))]));
    ctx.customer_repo
        .expect_get_customer_by_id()
        .times(1)
        .returning(|id| Ok(Some(customer(id))));
    ctx.barber_repo
        .expect_get_barber_by_id()
        .times(1)
        .returning(|id| Ok(Some(barber(id))));
    ctx.work_schedule_repo
        .expect_get_work_schedule_for_weekday()
        .times(1)
        .returning(|barber_id, weekday| Ok(Some(schedule_row(barber_id, weekday))));
}

#[tokio::test]
async fn test_booking_taken_slot_is_a_conflict() {
    let mut ctx = TestContext::new();
    let start = Utc.with_ymd_and_hms(2026, 9, 7, 10, 0, 0).unwrap();

    booking_mocks(&mut ctx);

    // The requested 10:00 slot is already occupied
    ctx.appointment_repo
        .expect_get_active_appointments_between()
        .times(1)
        .returning(move |barber_id, _, _| {
            Ok(vec![appointment_row(99, barber_id, start, "scheduled")])
        });

    // No create_appointment expectation: inserting here would fail the test
    let result = book_wrapper(&mut ctx, 1, 1, vec![1], start).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::Conflict(_) => {}
        e => panic!("Expected Conflict error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_booking_cancelled_appointment_frees_the_slot() {
    let mut ctx = TestContext::new();
    let start = Utc.with_ymd_and_hms(2026, 9, 7, 10, 0, 0).unwrap();

    booking_mocks(&mut ctx);

    // The 10:00 appointment was cancelled, so the repository does not
    // return it as a busy interval
    ctx.appointment_repo
        .expect_get_active_appointments_between()
        .times(1)
        .returning(|_, _, _| Ok(vec![]));

    ctx.appointment_repo
        .expect_create_appointment()
        .times(1)
        .returning(|barber_id, customer_id, service_ids, start, end, total_price| {
            Ok(DbAppointment {
                id: 42,
                barber_id,
                customer_id,
                service_ids,
                start_time: start,
                end_time: end,
                total_price,
                status: "scheduled".to_string(),
                created_at: Utc::now(),
            })
        });

    let appointment = book_wrapper(&mut ctx, 1, 1, vec![1], start).await.unwrap();

    assert_eq!(appointment.id, 42);
    assert_eq!(appointment.end_time, start + Duration::minutes(30));
    assert_eq!(appointment.total_price, Decimal::new(2500, 2));
    assert_eq!(appointment.status, "scheduled");
}

#[tokio::test]
async fn test_booking_with_no_services_is_rejected() {
    let mut ctx = TestContext::new();
    let start = Utc.with_ymd_and_hms(2026, 9, 7, 10, 0, 0).unwrap();

    // No expectations: an empty service list must fail before any lookup,
    // not slip through as a zero-duration booking
    let result = book_wrapper(&mut ctx, 1, 1, vec![], start).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_booking_duplicate_service_ids_stored_and_billed_once() {
    let mut ctx = TestContext::new();
    let start = Utc.with_ymd_and_hms(2026, 9, 7, 10, 0, 0).unwrap();

    // The catalog lookup receives the de-duplicated set
    ctx.service_repo
        .expect_get_services_by_ids()
        .with(predicate::eq(vec![1]))
        .times(1)
        .returning(|_| Ok(vec![service(1, 30, Decimal::new(2500, 2))]));
    ctx.customer_repo
        .expect_get_customer_by_id()
        .times(1)
        .returning(|id| Ok(Some(customer(id))));
    ctx.barber_repo
        .expect_get_barber_by_id()
        .times(1)
        .returning(|id| Ok(Some(barber(id))));
    ctx.work_schedule_repo
        .expect_get_work_schedule_for_weekday()
        .times(1)
        .returning(|barber_id, weekday| Ok(Some(schedule_row(barber_id, weekday))));
    ctx.appointment_repo
        .expect_get_active_appointments_between()
        .times(1)
        .returning(|_, _, _| Ok(vec![]));

    // The stored row carries the same ids the price was computed from
    ctx.appointment_repo
        .expect_create_appointment()
        .withf(|_, _, service_ids, _, _, _| service_ids == &[1])
        .times(1)
        .returning(|barber_id, customer_id, service_ids, start, end, total_price| {
            Ok(DbAppointment {
                id: 43,
                barber_id,
                customer_id,
                service_ids,
                start_time: start,
                end_time: end,
                total_price,
                status: "scheduled".to_string(),
                created_at: Utc::now(),
            })
        });

    let appointment = book_wrapper(&mut ctx, 1, 1, vec![1, 1], start).await.unwrap();

    assert_eq!(appointment.service_ids, vec![1]);
    assert_eq!(appointment.total_price, Decimal::new(2500, 2));
    assert_eq!(appointment.end_time, start + Duration::minutes(30));
}

#[tokio::test]
async fn test_booking_outside_working_hours_is_a_conflict() {
    let mut ctx = TestContext::new();
    // 18:00 is past the 17:00 end of day
    let start = Utc.with_ymd_and_hms(2026, 9, 7, 18, 0, 0).unwrap();

    booking_mocks(&mut ctx);

    ctx.appointment_repo
        .expect_get_active_appointments_between()
        .times(1)
        .returning(|_, _, _| Ok(vec![]));

    let result = book_wrapper(&mut ctx, 1, 1, vec![1], start).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::Conflict(_) => {}
        e => panic!("Expected Conflict error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_cancel_scheduled_appointment() {
    let mut ctx = TestContext::new();
    let start = Utc.with_ymd_and_hms(2026, 9, 7, 10, 0, 0).unwrap();

    ctx.appointment_repo
        .expect_get_appointment_by_id()
        .times(1)
        .returning(move |id| Ok(Some(appointment_row(id, 1, start, "scheduled"))));

    ctx.appointment_repo
        .expect_update_appointment_status()
        .with(predicate::eq(5), predicate::eq("cancelled_by_customer"))
        .times(1)
        .returning(move |id, status| {
            let mut row = appointment_row(id, 1, start, "scheduled");
            row.status = status.to_string();
            Ok(row)
        });

    let updated = cancel_wrapper(&mut ctx, 5, CancelParty::Customer).await.unwrap();

    assert_eq!(updated.status, "cancelled_by_customer");
}

#[tokio::test]
async fn test_cancel_completed_appointment_is_rejected() {
    let mut ctx = TestContext::new();
    let start = Utc.with_ymd_and_hms(2026, 9, 7, 10, 0, 0).unwrap();

    ctx.appointment_repo
        .expect_get_appointment_by_id()
        .times(1)
        .returning(move |id| Ok(Some(appointment_row(id, 1, start, "completed"))));

    let result = cancel_wrapper(&mut ctx, 5, CancelParty::Admin).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}
