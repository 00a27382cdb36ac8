use chrono::{DateTime, Utc};
use mockall::mock;
use rust_decimal::Decimal;

use crate::models::{DbAppointment, DbBarber, DbCustomer, DbService, DbWorkSchedule};
use barbershop_core::models::work_schedule::WorkDayEntry;

// Mock repositories for testing
mock! {
    pub ServiceRepo {
        pub async fn create_service(
            &self,
            name: &'static str,
            price: Decimal,
            duration_minutes: i32,
        ) -> eyre::Result<DbService>;

        pub async fn get_service_by_id(
            &self,
            id: i64,
        ) -> eyre::Result<Option<DbService>>;

        pub async fn get_services_by_ids(
            &self,
            ids: Vec<i64>,
        ) -> eyre::Result<Vec<DbService>>;

        pub async fn list_services(&self) -> eyre::Result<Vec<DbService>>;

        pub async fn update_service(
            &self,
            id: i64,
            name: Option<&'static str>,
            price: Option<Decimal>,
            duration_minutes: Option<i32>,
        ) -> eyre::Result<DbService>;

        pub async fn delete_service(&self, id: i64) -> eyre::Result<bool>;
    }
}

mock! {
    pub BarberRepo {
        pub async fn create_barber(
            &self,
            name: &'static str,
            email: &'static str,
            bio: Option<&'static str>,
        ) -> eyre::Result<DbBarber>;

        pub async fn get_barber_by_id(
            &self,
            id: i64,
        ) -> eyre::Result<Option<DbBarber>>;

        pub async fn list_barbers(&self) -> eyre::Result<Vec<DbBarber>>;

        pub async fn update_barber(
            &self,
            id: i64,
            name: Option<&'static str>,
            email: Option<&'static str>,
            bio: Option<&'static str>,
        ) -> eyre::Result<DbBarber>;
    }
}

mock! {
    pub CustomerRepo {
        pub async fn create_customer(
            &self,
            email: &'static str,
            name: &'static str,
            password_hash: &'static str,
        ) -> eyre::Result<DbCustomer>;

        pub async fn get_customer_by_id(
            &self,
            id: i64,
        ) -> eyre::Result<Option<DbCustomer>>;

        pub async fn get_customer_by_email(
            &self,
            email: &'static str,
        ) -> eyre::Result<Option<DbCustomer>>;
    }
}

mock! {
    pub WorkScheduleRepo {
        pub async fn get_work_schedule_for_weekday(
            &self,
            barber_id: i64,
            weekday: i16,
        ) -> eyre::Result<Option<DbWorkSchedule>>;

        pub async fn get_week(
            &self,
            barber_id: i64,
        ) -> eyre::Result<Vec<DbWorkSchedule>>;

        pub async fn replace_week(
            &self,
            barber_id: i64,
            entries: Vec<WorkDayEntry>,
        ) -> eyre::Result<()>;
    }
}

mock! {
    pub AppointmentRepo {
        pub async fn create_appointment(
            &self,
            barber_id: i64,
            customer_id: i64,
            service_ids: Vec<i64>,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
            total_price: Decimal,
        ) -> eyre::Result<DbAppointment>;

        pub async fn get_appointment_by_id(
            &self,
            id: i64,
        ) -> eyre::Result<Option<DbAppointment>>;

        pub async fn get_active_appointments_between(
            &self,
            barber_id: i64,
            day_start: DateTime<Utc>,
            day_end: DateTime<Utc>,
        ) -> eyre::Result<Vec<DbAppointment>>;

        pub async fn list_appointments_by_barber_between(
            &self,
            barber_id: i64,
            day_start: DateTime<Utc>,
            day_end: DateTime<Utc>,
        ) -> eyre::Result<Vec<DbAppointment>>;

        pub async fn list_appointments_by_customer(
            &self,
            customer_id: i64,
        ) -> eyre::Result<Vec<DbAppointment>>;

        pub async fn update_appointment_status(
            &self,
            id: i64,
            status: &'static str,
        ) -> eyre::Result<DbAppointment>;
    }
}
