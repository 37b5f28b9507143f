//! Data models for GearGuard

pub mod asset;
pub mod enums;
pub mod equipment;
pub mod maintenance_request;
pub mod report;
pub mod task_activity;
pub mod team;

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

// Re-export commonly used types
pub use asset::{Asset, MaintenanceLog};
pub use enums::{EquipmentStatus, Priority, RequestType, ScheduleStatus, Stage};
pub use equipment::Equipment;
pub use maintenance_request::{MaintenanceRequest, MaintenanceRequestDetails};
pub use task_activity::TaskActivity;
pub use team::{Team, TeamMember};

/// Parse a YYYY-MM-DD field from a request payload
pub fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {} (use YYYY-MM-DD)", field)))
}

/// Parse an optional YYYY-MM-DD field
pub fn parse_optional_date(field: &str, value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    value.map(|v| parse_date(field, v)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("scheduled_date", "2024-02-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
        );
    }

    #[test]
    fn test_malformed_date_is_validation_failure() {
        let err = parse_date("scheduled_date", "15/02/2024").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("scheduled_date")));
    }

    #[test]
    fn test_optional_date() {
        assert_eq!(parse_optional_date("purchase_date", None).unwrap(), None);
        assert!(parse_optional_date("purchase_date", Some("2024-13-01")).is_err());
    }
}
