use chrono::{Datelike, NaiveDate, NaiveTime};
use tracing::{debug, error};
use crate::domain::models::schedule_rule::ScheduleRule;
use crate::domain::ports::{LockMode, RuleSource};
use crate::error::AppError;

/// Weekday index used by schedule rules: Monday = 0 .. Sunday = 6.
pub fn day_of_week(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_monday() as i32
}

/// Finds the available weekly rule that applies to `date`.
///
/// With a `time`, exactly one rule may cover it: two or more covering rules
/// means the restaurant's schedule overlaps and a [`AppError::ConfigurationConflict`]
/// is returned instead of guessing. Without a `time` the earliest-starting
/// rule of the day is returned.
pub async fn resolve_rule<S>(
    source: &mut S,
    restaurant_id: &str,
    date: NaiveDate,
    time: Option<NaiveTime>,
    lock: LockMode,
) -> Result<Option<ScheduleRule>, AppError>
where
    S: RuleSource + ?Sized,
{
    let weekday = day_of_week(date);
    let mut rules = source.find_rules(restaurant_id, weekday, time, lock).await?;

    if let Some(t) = time {
        rules.retain(|r| r.is_available && r.covers(t));
        if rules.len() > 1 {
            let windows: Vec<String> = rules.iter()
                .map(|r| format!("{}-{}", r.start_time.format("%H:%M"), r.end_time.format("%H:%M")))
                .collect();
            error!(restaurant_id, weekday, time = %t, ?windows, "overlapping schedule rules");
            return Err(AppError::ConfigurationConflict(format!(
                "{} overlapping schedule rules cover {} on weekday {}: {}",
                rules.len(), t.format("%H:%M"), weekday, windows.join(", ")
            )));
        }
    } else {
        rules.retain(|r| r.is_available);
    }

    let rule = rules.into_iter().min_by_key(|r| r.start_time);
    debug!(restaurant_id, weekday, found = rule.is_some(), "schedule rule lookup");
    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::availability::fake::{at, monday, FakeStore};

    fn store_with(rules: Vec<ScheduleRule>) -> FakeStore {
        FakeStore { rules, ..Default::default() }
    }

    #[test]
    fn test_day_of_week_starts_monday() {
        assert_eq!(day_of_week(monday()), 0);
        assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2026, 2, 15).unwrap()), 6);
    }

    #[tokio::test]
    async fn test_returns_none_when_no_rule() {
        let mut store = FakeStore::default();
        let rule = resolve_rule(&mut store, "r1", monday(), None, LockMode::Shared).await.unwrap();
        assert!(rule.is_none());
    }

    #[tokio::test]
    async fn test_matches_by_weekday() {
        let mut store = store_with(vec![ScheduleRule::new("r1".into(), 0, at(9, 0), at(17, 0), 10)]);
        let rule = resolve_rule(&mut store, "r1", monday(), None, LockMode::Shared).await.unwrap();
        assert_eq!(rule.unwrap().day_of_week, 0);

        let tuesday = monday().succ_opt().unwrap();
        assert!(resolve_rule(&mut store, "r1", tuesday, None, LockMode::Shared).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_filters_by_time() {
        let mut store = store_with(vec![ScheduleRule::new("r1".into(), 0, at(9, 0), at(17, 0), 10)]);
        assert!(resolve_rule(&mut store, "r1", monday(), Some(at(12, 0)), LockMode::Shared).await.unwrap().is_some());
        assert!(resolve_rule(&mut store, "r1", monday(), Some(at(18, 0)), LockMode::Shared).await.unwrap().is_none());
        assert!(resolve_rule(&mut store, "r1", monday(), Some(at(17, 0)), LockMode::Shared).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unavailable_rules_are_ignored() {
        let mut closed = ScheduleRule::new("r1".into(), 0, at(9, 0), at(17, 0), 10);
        closed.is_available = false;
        let mut store = store_with(vec![closed]);
        assert!(resolve_rule(&mut store, "r1", monday(), Some(at(12, 0)), LockMode::Shared).await.unwrap().is_none());
        assert!(resolve_rule(&mut store, "r1", monday(), None, LockMode::Shared).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overlap_at_specific_time_is_a_conflict() {
        let mut store = store_with(vec![
            ScheduleRule::new("r1".into(), 0, at(12, 0), at(18, 0), 50),
            ScheduleRule::new("r1".into(), 0, at(14, 0), at(20, 0), 50),
        ]);
        let err = resolve_rule(&mut store, "r1", monday(), Some(at(15, 0)), LockMode::Shared).await.unwrap_err();
        assert!(matches!(err, AppError::ConfigurationConflict(_)));

        // Outside the overlapping part only one rule applies.
        let rule = resolve_rule(&mut store, "r1", monday(), Some(at(13, 0)), LockMode::Shared).await.unwrap().unwrap();
        assert_eq!(rule.start_time, at(12, 0));
    }

    #[tokio::test]
    async fn test_whole_day_lookup_takes_earliest_rule() {
        let mut store = store_with(vec![
            ScheduleRule::new("r1".into(), 0, at(19, 0), at(23, 0), 30),
            ScheduleRule::new("r1".into(), 0, at(12, 0), at(15, 0), 40),
        ]);
        let rule = resolve_rule(&mut store, "r1", monday(), None, LockMode::Shared).await.unwrap().unwrap();
        assert_eq!(rule.start_time, at(12, 0));
    }
}
