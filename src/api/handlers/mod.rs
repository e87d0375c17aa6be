pub mod availability;
pub mod booking;
pub mod exception_date;
pub mod health;
pub mod restaurant;
pub mod schedule_rule;
pub mod season;
