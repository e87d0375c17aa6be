pub mod sqlite_availability_store;
pub mod sqlite_restaurant_repo;
pub mod sqlite_schedule_rule_repo;
pub mod sqlite_season_repo;
pub mod sqlite_exception_date_repo;
pub mod sqlite_booking_repo;

pub mod postgres_availability_store;
pub mod postgres_restaurant_repo;
pub mod postgres_schedule_rule_repo;
pub mod postgres_season_repo;
pub mod postgres_exception_date_repo;
pub mod postgres_booking_repo;
