use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBarber {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCustomer {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub duration_minutes: i32,
    pub created_at: DateTime<Utc>,
}

/// One row per (barber, weekday); weekday is 0-6 with Monday = 0.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWorkSchedule {
    pub barber_id: i64,
    pub weekday: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub break_start: NaiveTime,
    pub break_end: NaiveTime,
    pub created_at: DateTime<Utc>,
}

/// Appointment rows are never deleted; `status` holds the snake_case name
/// of a `barbershop_core` `AppointmentStatus`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: i64,
    pub barber_id: i64,
    pub customer_id: i64,
    pub service_ids: Vec<i64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
