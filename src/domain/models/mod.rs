pub mod booking;
pub mod exception_date;
pub mod restaurant;
pub mod schedule_rule;
pub mod season;
