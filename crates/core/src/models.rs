pub mod appointment;
pub mod availability;
pub mod barber;
pub mod customer;
pub mod service;
pub mod work_schedule;
