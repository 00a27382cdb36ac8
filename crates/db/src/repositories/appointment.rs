use crate::models::DbAppointment;
use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

pub async fn create_appointment(
    pool: &Pool<Postgres>,
    barber_id: i64,
    customer_id: i64,
    service_ids: &[i64],
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    total_price: Decimal,
) -> Result<DbAppointment> {
    tracing::debug!(
        "Creating appointment: barber_id={}, customer_id={}, start={}",
        barber_id,
        customer_id,
        start_time
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments
            (barber_id, customer_id, service_ids, start_time, end_time, total_price, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'scheduled')
        RETURNING id, barber_id, customer_id, service_ids, start_time, end_time,
                  total_price, status, created_at
        "#,
    )
    .bind(barber_id)
    .bind(customer_id)
    .bind(service_ids)
    .bind(start_time)
    .bind(end_time)
    .bind(total_price)
    .fetch_one(pool)
    .await?;

    Ok(appointment)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, barber_id, customer_id, service_ids, start_time, end_time,
               total_price, status, created_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Busy intervals for the availability calculation: non-cancelled
/// appointments whose start falls in `[day_start, day_end)`.
pub async fn get_active_appointments_between(
    pool: &Pool<Postgres>,
    barber_id: i64,
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, barber_id, customer_id, service_ids, start_time, end_time,
               total_price, status, created_at
        FROM appointments
        WHERE barber_id = $1
          AND start_time >= $2
          AND start_time < $3
          AND status NOT IN ('cancelled_by_customer', 'cancelled_by_admin')
        ORDER BY start_time ASC
        "#,
    )
    .bind(barber_id)
    .bind(day_start)
    .bind(day_end)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn list_appointments_by_barber_between(
    pool: &Pool<Postgres>,
    barber_id: i64,
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, barber_id, customer_id, service_ids, start_time, end_time,
               total_price, status, created_at
        FROM appointments
        WHERE barber_id = $1 AND start_time >= $2 AND start_time < $3
        ORDER BY start_time ASC
        "#,
    )
    .bind(barber_id)
    .bind(day_start)
    .bind(day_end)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn list_appointments_by_customer(
    pool: &Pool<Postgres>,
    customer_id: i64,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, barber_id, customer_id, service_ids, start_time, end_time,
               total_price, status, created_at
        FROM appointments
        WHERE customer_id = $1
        ORDER BY start_time DESC
        "#,
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn update_appointment_status(
    pool: &Pool<Postgres>,
    id: i64,
    status: &str,
) -> Result<DbAppointment> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET status = $2
        WHERE id = $1
        RETURNING id, barber_id, customer_id, service_ids, start_time, end_time,
                  total_price, status, created_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("Appointment not found"))?;

    Ok(appointment)
}
