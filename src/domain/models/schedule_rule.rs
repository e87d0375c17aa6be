use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use crate::error::AppError;

/// A weekly opening window. `day_of_week` follows Monday = 0 .. Sunday = 6.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct ScheduleRule {
    pub id: String,
    pub restaurant_id: String,
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: i32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl ScheduleRule {
    pub fn new(
        restaurant_id: String,
        day_of_week: i32,
        start_time: NaiveTime,
        end_time: NaiveTime,
        capacity: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            restaurant_id,
            day_of_week,
            start_time,
            end_time,
            capacity,
            is_available: true,
            created_at: Utc::now(),
        }
    }

    /// Checks the invariants a stored rule must satisfy.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(0..=6).contains(&self.day_of_week) {
            return Err(AppError::Validation("day_of_week must be between 0 (Monday) and 6 (Sunday)".into()));
        }
        if self.start_time >= self.end_time {
            return Err(AppError::Validation("start_time must be before end_time".into()));
        }
        if self.capacity < 1 {
            return Err(AppError::Validation("capacity must be at least 1".into()));
        }
        Ok(())
    }

    /// Half-open containment: `start_time <= time < end_time`.
    pub fn covers(&self, time: NaiveTime) -> bool {
        self.start_time <= time && time < self.end_time
    }

    pub fn overlaps(&self, other: &ScheduleRule) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_covers_is_half_open() {
        let rule = ScheduleRule::new("r".into(), 0, t(12, 0), t(18, 0), 50);
        assert!(rule.covers(t(12, 0)));
        assert!(rule.covers(t(17, 59)));
        assert!(!rule.covers(t(18, 0)));
        assert!(!rule.covers(t(11, 59)));
    }

    #[test]
    fn test_adjacent_rules_do_not_overlap() {
        let lunch = ScheduleRule::new("r".into(), 0, t(12, 0), t(15, 0), 50);
        let dinner = ScheduleRule::new("r".into(), 0, t(15, 0), t(22, 0), 50);
        let late = ScheduleRule::new("r".into(), 0, t(14, 0), t(20, 0), 50);
        assert!(!lunch.overlaps(&dinner));
        assert!(lunch.overlaps(&late));
        assert!(late.overlaps(&dinner));
    }

    #[test]
    fn test_validate_rejects_bad_rules() {
        assert!(ScheduleRule::new("r".into(), 6, t(12, 0), t(14, 0), 1).validate().is_ok());
        assert!(ScheduleRule::new("r".into(), 7, t(12, 0), t(14, 0), 10).validate().is_err());
        assert!(ScheduleRule::new("r".into(), 0, t(14, 0), t(14, 0), 10).validate().is_err());
        assert!(ScheduleRule::new("r".into(), 0, t(12, 0), t(14, 0), 0).validate().is_err());
    }
}
