pub mod appointments;
pub mod availability;
pub mod barbers;
pub mod customers;
pub mod services;
pub mod work_schedules;
