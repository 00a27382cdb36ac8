mod appointment_test;
mod availability_test;
mod work_schedule_test;
