use crate::models::DbWorkSchedule;
use barbershop_core::models::work_schedule::WorkDayEntry;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_work_schedule_for_weekday(
    pool: &Pool<Postgres>,
    barber_id: i64,
    weekday: i16,
) -> Result<Option<DbWorkSchedule>> {
    let schedule = sqlx::query_as::<_, DbWorkSchedule>(
        r#"
        SELECT barber_id, weekday, start_time, end_time, break_start, break_end, created_at
        FROM work_schedules
        WHERE barber_id = $1 AND weekday = $2
        "#,
    )
    .bind(barber_id)
    .bind(weekday)
    .fetch_optional(pool)
    .await?;

    Ok(schedule)
}

pub async fn get_week(pool: &Pool<Postgres>, barber_id: i64) -> Result<Vec<DbWorkSchedule>> {
    let schedules = sqlx::query_as::<_, DbWorkSchedule>(
        r#"
        SELECT barber_id, weekday, start_time, end_time, break_start, break_end, created_at
        FROM work_schedules
        WHERE barber_id = $1
        ORDER BY weekday ASC
        "#,
    )
    .bind(barber_id)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

/// Reconciles a barber's full weekly schedule in one transaction: listed
/// weekdays are upserted, weekdays absent from `entries` lose their row.
pub async fn replace_week(
    pool: &Pool<Postgres>,
    barber_id: i64,
    entries: &[WorkDayEntry],
) -> Result<()> {
    tracing::debug!(
        "Replacing weekly schedule: barber_id={}, entries={}",
        barber_id,
        entries.len()
    );

    let weekdays: Vec<i16> = entries.iter().map(|e| i16::from(e.weekday)).collect();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM work_schedules
        WHERE barber_id = $1 AND weekday <> ALL($2)
        "#,
    )
    .bind(barber_id)
    .bind(&weekdays)
    .execute(&mut *tx)
    .await?;

    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO work_schedules (barber_id, weekday, start_time, end_time, break_start, break_end)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (barber_id, weekday) DO UPDATE
            SET start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time,
                break_start = EXCLUDED.break_start,
                break_end = EXCLUDED.break_end
            "#,
        )
        .bind(barber_id)
        .bind(i16::from(entry.weekday))
        .bind(entry.start_time)
        .bind(entry.end_time)
        .bind(entry.break_start)
        .bind(entry.break_end)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(())
}
