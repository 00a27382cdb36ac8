use barbershop_api::middleware::error_handling::AppError;
use barbershop_core::{errors::BookingError, models::work_schedule::WorkDayEntry};
use chrono::NaiveTime;
use mockall::predicate;
use std::collections::BTreeSet;

use crate::test_utils::TestContext;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn entry(weekday: u8) -> WorkDayEntry {
    WorkDayEntry {
        weekday,
        start_time: t(9, 0),
        end_time: t(17, 0),
        break_start: t(12, 0),
        break_end: t(12, 30),
    }
}

// Mirrors the batch-update handler: every entry is validated before any
// write, and one bad entry fails the whole batch.
async fn update_schedule_wrapper(
    ctx: &mut TestContext,
    barber_id: i64,
    days: Vec<WorkDayEntry>,
) -> Result<(), AppError> {
    let mut seen = BTreeSet::new();
    for entry in &days {
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

    ctx.work_schedule_repo.replace_week(barber_id, days).await?;
    Ok(())
}

#[tokio::test]
async fn test_valid_batch_replaces_week() {
    let mut ctx = TestContext::new();
    let days = vec![entry(0), entry(1), entry(4)];

    ctx.work_schedule_repo
        .expect_replace_week()
        .with(predicate::eq(3), predicate::eq(days.clone()))
        .times(1)
        .returning(|_, _| Ok(()));

    update_schedule_wrapper(&mut ctx, 3, days).await.unwrap();
}

#[tokio::test]
async fn test_inverted_hours_fail_the_whole_batch() {
    let mut ctx = TestContext::new();

    let mut bad = entry(2);
    bad.start_time = t(18, 0);
    bad.end_time = t(9, 0);

    // One valid entry plus one invalid entry: replace_week must not run
    let result = update_schedule_wrapper(&mut ctx, 3, vec![entry(0), bad]).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_inverted_break_fails_the_whole_batch() {
    let mut ctx = TestContext::new();

    let mut bad = entry(2);
    bad.break_start = t(13, 0);
    bad.break_end = t(12, 0);

    let result = update_schedule_wrapper(&mut ctx, 3, vec![bad]).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_duplicate_weekday_fails_the_whole_batch() {
    let mut ctx = TestContext::new();

    let result = update_schedule_wrapper(&mut ctx, 3, vec![entry(1), entry(1)]).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        BookingError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_empty_batch_clears_the_week() {
    let mut ctx = TestContext::new();

    // An empty list is valid: the barber simply works no days
    ctx.work_schedule_repo
        .expect_replace_week()
        .with(predicate::eq(3), predicate::eq(Vec::<WorkDayEntry>::new()))
        .times(1)
        .returning(|_, _| Ok(()));

    update_schedule_wrapper(&mut ctx, 3, Vec::new()).await.unwrap();
}
