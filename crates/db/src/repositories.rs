pub mod appointment;
pub mod barber;
pub mod customer;
pub mod service;
pub mod work_schedule;
