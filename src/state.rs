use std::sync::Arc;
use crate::domain::ports::{
    BookingRepository, ExceptionDateRepository, RestaurantRepository, ScheduleRuleRepository,
    SeasonRepository,
};
use crate::domain::services::availability::AvailabilityService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub restaurant_repo: Arc<dyn RestaurantRepository>,
    pub rule_repo: Arc<dyn ScheduleRuleRepository>,
    pub season_repo: Arc<dyn SeasonRepository>,
    pub exception_repo: Arc<dyn ExceptionDateRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub availability: Arc<AvailabilityService>,
}
