//! Overdue / due-soon evaluation of next-service dates
//!
//! Everything here is pure: callers pass "today" so the same clock is used
//! for a whole response.

use chrono::{Duration, NaiveDate, Utc};

use crate::models::{
    asset::{Asset, AssetSchedule},
    enums::{ScheduleStatus, Stage},
};

/// Today's date on the server clock (UTC)
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduleEvaluator {
    due_window: Duration,
}

impl ScheduleEvaluator {
    pub fn new(due_window_days: i64) -> Self {
        Self {
            due_window: Duration::days(due_window_days.clamp(0, i64::from(i32::MAX))),
        }
    }

    /// Overdue before today, Due up to the end of the window, Upcoming after
    pub fn classify(&self, next_due: NaiveDate, today: NaiveDate) -> ScheduleStatus {
        if next_due < today {
            ScheduleStatus::Overdue
        } else if today
            .checked_add_signed(self.due_window)
            .map_or(true, |window_end| next_due <= window_end)
        {
            ScheduleStatus::Due
        } else {
            ScheduleStatus::Upcoming
        }
    }

    /// A request is overdue when its scheduled date has passed and it is still open
    pub fn is_request_overdue(&self, stage: Stage, scheduled_date: Option<NaiveDate>, today: NaiveDate) -> bool {
        if stage.is_terminal() {
            return false;
        }
        scheduled_date
            .map(|date| self.classify(date, today) == ScheduleStatus::Overdue)
            .unwrap_or(false)
    }

    /// Schedule line of a legacy asset
    pub fn asset_schedule(&self, asset: &Asset, today: NaiveDate) -> AssetSchedule {
        let next_due = next_service_date(
            asset.last_maintenance_date,
            asset.created_at.date_naive(),
            asset.maintenance_interval_days,
        );
        AssetSchedule {
            asset_id: asset.id,
            name: asset.name.clone(),
            last_maintenance_date: asset.last_maintenance_date,
            next_due,
            status: next_due.map(|date| self.classify(date, today)),
        }
    }
}

impl Default for ScheduleEvaluator {
    fn default() -> Self {
        Self::new(7)
    }
}

/// Last service (or creation) date plus the interval; no interval, no date.
/// A date past the calendar range is treated as never due.
pub fn next_service_date(
    last_maintenance: Option<NaiveDate>,
    created_on: NaiveDate,
    interval_days: Option<i32>,
) -> Option<NaiveDate> {
    let interval = interval_days.filter(|days| *days > 0)?;
    let base = last_maintenance.unwrap_or(created_on);
    base.checked_add_signed(Duration::days(i64::from(interval)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn asset(last: Option<NaiveDate>, interval: Option<i32>) -> Asset {
        Asset {
            id: 1,
            name: "Air Compressor".to_string(),
            category: Some("Equipment".to_string()),
            asset_code: Some("AC-001".to_string()),
            purchase_date: None,
            warranty_expiry: None,
            maintenance_interval_days: interval,
            status: Some("Active".to_string()),
            notes: None,
            last_maintenance_date: last,
            deleted: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_classify_boundaries() {
        let evaluator = ScheduleEvaluator::default();
        let today = date(2024, 3, 10);

        assert_eq!(evaluator.classify(date(2024, 3, 9), today), ScheduleStatus::Overdue);
        assert_eq!(evaluator.classify(today, today), ScheduleStatus::Due);
        assert_eq!(evaluator.classify(date(2024, 3, 17), today), ScheduleStatus::Due);
        assert_eq!(evaluator.classify(date(2024, 3, 18), today), ScheduleStatus::Upcoming);
    }

    #[test]
    fn test_window_past_calendar_end_counts_as_due() {
        let evaluator = ScheduleEvaluator::new(i64::MAX);
        let today = date(2024, 3, 10);
        assert_eq!(evaluator.classify(date(2030, 1, 1), today), ScheduleStatus::Due);
    }

    #[test]
    fn test_huge_interval_has_no_next_date() {
        let evaluator = ScheduleEvaluator::default();
        let line = evaluator.asset_schedule(&asset(Some(date(2024, 1, 1)), Some(200_000_000)), date(2024, 3, 10));
        assert_eq!(line.next_due, None);
        assert_eq!(line.status, None);
    }

    #[test]
    fn test_window_is_configurable() {
        let evaluator = ScheduleEvaluator::new(2);
        let today = date(2024, 3, 10);
        assert_eq!(evaluator.classify(date(2024, 3, 13), today), ScheduleStatus::Upcoming);
    }

    #[test]
    fn test_open_request_scheduled_yesterday_is_overdue() {
        let evaluator = ScheduleEvaluator::default();
        let today = date(2024, 3, 10);
        let yesterday = date(2024, 3, 9);

        assert!(evaluator.is_request_overdue(Stage::New, Some(yesterday), today));
        assert!(evaluator.is_request_overdue(Stage::InProgress, Some(yesterday), today));
    }

    #[test]
    fn test_closed_request_is_never_overdue() {
        let evaluator = ScheduleEvaluator::default();
        let today = date(2024, 3, 10);
        let yesterday = date(2024, 3, 9);

        assert!(!evaluator.is_request_overdue(Stage::Repaired, Some(yesterday), today));
        assert!(!evaluator.is_request_overdue(Stage::Scrap, Some(yesterday), today));
    }

    #[test]
    fn test_unscheduled_or_future_request_is_not_overdue() {
        let evaluator = ScheduleEvaluator::default();
        let today = date(2024, 3, 10);

        assert!(!evaluator.is_request_overdue(Stage::New, None, today));
        assert!(!evaluator.is_request_overdue(Stage::New, Some(today), today));
    }

    #[test]
    fn test_next_service_date_from_last_maintenance() {
        assert_eq!(
            next_service_date(Some(date(2024, 9, 1)), date(2022, 1, 10), Some(90)),
            Some(date(2024, 11, 30))
        );
    }

    #[test]
    fn test_next_service_date_falls_back_to_creation() {
        assert_eq!(
            next_service_date(None, date(2024, 1, 1), Some(30)),
            Some(date(2024, 1, 31))
        );
    }

    #[test]
    fn test_no_interval_means_no_schedule() {
        assert_eq!(next_service_date(Some(date(2024, 1, 1)), date(2024, 1, 1), None), None);
        assert_eq!(next_service_date(Some(date(2024, 1, 1)), date(2024, 1, 1), Some(0)), None);
    }

    #[test]
    fn test_asset_schedule() {
        let evaluator = ScheduleEvaluator::default();
        let today = date(2024, 12, 5);

        let overdue = evaluator.asset_schedule(&asset(Some(date(2024, 9, 1)), Some(90)), today);
        assert_eq!(overdue.next_due, Some(date(2024, 11, 30)));
        assert_eq!(overdue.status, Some(ScheduleStatus::Overdue));

        let due = evaluator.asset_schedule(&asset(Some(date(2024, 11, 10)), Some(30)), today);
        assert_eq!(due.status, Some(ScheduleStatus::Due));

        let unscheduled = evaluator.asset_schedule(&asset(None, None), today);
        assert_eq!(unscheduled.next_due, None);
        assert_eq!(unscheduled.status, None);
    }
}
