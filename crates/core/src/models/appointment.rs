use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of an appointment. Rows are never deleted; cancellation is a
/// status transition, and only non-cancelled appointments occupy calendar
/// time for availability purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    CancelledByCustomer,
    CancelledByAdmin,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::CancelledByCustomer => "cancelled_by_customer",
            AppointmentStatus::CancelledByAdmin => "cancelled_by_admin",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::CancelledByCustomer | AppointmentStatus::CancelledByAdmin
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled_by_customer" => Ok(AppointmentStatus::CancelledByCustomer),
            "cancelled_by_admin" => Ok(AppointmentStatus::CancelledByAdmin),
            other => Err(format!("unknown appointment status: {other}")),
        }
    }
}

/// Who is cancelling an appointment; determines the resulting status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelParty {
    Customer,
    Admin,
}

impl CancelParty {
    pub fn cancelled_status(&self) -> AppointmentStatus {
        match self {
            CancelParty::Customer => AppointmentStatus::CancelledByCustomer,
            CancelParty::Admin => AppointmentStatus::CancelledByAdmin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub customer_id: i64,
    pub barber_id: i64,
    pub service_ids: Vec<i64>,
    pub start: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    pub cancelled_by: CancelParty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub id: i64,
    pub barber_id: i64,
    pub customer_id: i64,
    pub service_ids: Vec<i64>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_price: Decimal,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}
