use barbershop_api::handlers::availability::parse_service_ids;
use barbershop_api::middleware::error_handling::AppError;
use barbershop_core::{
    availability::{compute_available_slots, BusyInterval, DayHours},
    errors::BookingError,
};
use barbershop_db::models::{DbAppointment, DbService, DbWorkSchedule};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::test_utils::TestContext;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn service(id: i64, duration_minutes: i32) -> DbService {
    DbService {
        id,
        name: format!("Service {id}"),
        price: Decimal::new(2000, 2),
        duration_minutes,
        created_at: Utc::now(),
    }
}

fn schedule_row(barber_id: i64, weekday: i16, start: NaiveTime, end: NaiveTime) -> DbWorkSchedule {
    DbWorkSchedule {
        barber_id,
        weekday,
        start_time: start,
        end_time: end,
        // Break outside the working window so it does not interfere
        break_start: t(0, 0),
        break_end: t(0, 1),
        created_at: Utc::now(),
    }
}

fn appointment_row(
    barber_id: i64,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> DbAppointment {
    DbAppointment {
        id: 1,
        barber_id,
        customer_id: 1,
        service_ids: vec![1],
        start_time: Utc.from_utc_datetime(&date.and_time(start)),
        end_time: Utc.from_utc_datetime(&date.and_time(end)),
        total_price: Decimal::new(2000, 2),
        status: "scheduled".to_string(),
        created_at: Utc::now(),
    }
}

// Mirrors the orchestration in the availability handler against mock
// repositories: resolve services, load the weekday schedule, load busy
// intervals, and run the pure slot scan.
async fn compute_availability_wrapper(
    ctx: &mut TestContext,
    barber_id: i64,
    raw_service_ids: &str,
    date: NaiveDate,
) -> Result<Vec<NaiveTime>, AppError> {
    let service_ids = parse_service_ids(raw_service_ids)?;
    let distinct: Vec<i64> = service_ids
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let services = ctx.service_repo.get_services_by_ids(distinct.clone()).await?;
    if services.len() < distinct.len() {
        return Err(AppError(BookingError::Validation(
            "One or more service ids do not exist".to_string(),
        )));
    }
    let duration: i64 = services.iter().map(|s| s.duration_minutes as i64).sum();

    let weekday = date.weekday().num_days_from_monday() as i16;
    let schedule = match ctx
        .work_schedule_repo
        .get_work_schedule_for_weekday(barber_id, weekday)
        .await?
    {
        Some(schedule) => schedule,
        None => return Ok(Vec::new()),
    };

    let day_start = date.and_time(NaiveTime::MIN).and_utc();
    let day_end = day_start + Duration::days(1);
    let appointments = ctx
        .appointment_repo
        .get_active_appointments_between(barber_id, day_start, day_end)
        .await?;
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

    Ok(compute_available_slots(&day, &busy, duration, 15))
}

#[test]
fn test_parse_service_ids() {
    assert_eq!(parse_service_ids("1,2, 3").unwrap(), vec![1, 2, 3]);

    match parse_service_ids("1,abc").unwrap_err().0 {
        BookingError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }

    match parse_service_ids("").unwrap_err().0 {
        BookingError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_availability_unknown_service_id_is_validation_error() {
    let mut ctx = TestContext::new();

    // Only one of the two requested services exists
    ctx.service_repo
        .expect_get_services_by_ids()
        .times(1)
        .returning(|_| Ok(vec![service(1, 30)]));

    let date = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();
    let result = compute_availability_wrapper(&mut ctx, 1, "1,2", date).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_availability_no_schedule_row_is_empty_not_error() {
    let mut ctx = TestContext::new();

    ctx.service_repo
        .expect_get_services_by_ids()
        .times(1)
        .returning(|_| Ok(vec![service(1, 30)]));

    // Barber does not work on this weekday
    ctx.work_schedule_repo
        .expect_get_work_schedule_for_weekday()
        .times(1)
        .returning(|_, _| Ok(None));

    let date = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();
    let slots = compute_availability_wrapper(&mut ctx, 1, "1", date)
        .await
        .expect("empty availability is not an error");

    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_availability_excludes_existing_appointment() {
    let mut ctx = TestContext::new();
    let date = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();

    ctx.service_repo
        .expect_get_services_by_ids()
        .times(1)
        .returning(|_| Ok(vec![service(1, 30)]));

    ctx.work_schedule_repo
        .expect_get_work_schedule_for_weekday()
        .times(1)
        .returning(move |barber_id, weekday| {
            Ok(Some(schedule_row(barber_id, weekday, t(9, 0), t(11, 0))))
        });

    ctx.appointment_repo
        .expect_get_active_appointments_between()
        .times(1)
        .returning(move |barber_id, _, _| {
            Ok(vec![appointment_row(barber_id, date, t(10, 0), t(10, 30))])
        });

    let slots = compute_availability_wrapper(&mut ctx, 1, "1", date)
        .await
        .unwrap();

    assert_eq!(slots, vec![t(9, 0), t(9, 15), t(9, 30), t(10, 30)]);
}

#[tokio::test]
async fn test_availability_sums_durations_of_requested_services() {
    let mut ctx = TestContext::new();
    let date = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();

    // 30 + 15 = 45 minutes total
    ctx.service_repo
        .expect_get_services_by_ids()
        .times(1)
        .returning(|_| Ok(vec![service(1, 30), service(2, 15)]));

    ctx.work_schedule_repo
        .expect_get_work_schedule_for_weekday()
        .times(1)
        .returning(move |barber_id, weekday| {
            Ok(Some(schedule_row(barber_id, weekday, t(9, 0), t(10, 0))))
        });

    ctx.appointment_repo
        .expect_get_active_appointments_between()
        .times(1)
        .returning(|_, _, _| Ok(vec![]));

    let slots = compute_availability_wrapper(&mut ctx, 1, "1,2", date)
        .await
        .unwrap();

    // Only 09:00 and 09:15 leave room for 45 minutes before 10:00
    assert_eq!(slots, vec![t(9, 0), t(9, 15)]);
}
