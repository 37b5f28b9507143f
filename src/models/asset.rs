//! Legacy asset and maintenance log models
//!
//! These predate equipment/maintenance requests and only share data with
//! them through the name-based join of the costs report.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::ScheduleStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Asset {
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    pub asset_code: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    /// Days between services; no interval means no schedule
    pub maintenance_interval_days: Option<i32>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub last_maintenance_date: Option<NaiveDate>,
    #[serde(skip)]
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AssetQuery {
    /// Substring match on name or asset code
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAsset {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub category: Option<String>,
    pub asset_code: Option<String>,
    pub purchase_date: Option<String>,
    pub warranty_expiry: Option<String>,
    #[validate(range(min = 1, max = 36500, message = "Interval must be between 1 and 36500 days"))]
    pub maintenance_interval_days: Option<i32>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub last_maintenance_date: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAsset {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub category: Option<String>,
    pub asset_code: Option<String>,
    pub purchase_date: Option<String>,
    pub warranty_expiry: Option<String>,
    #[validate(range(min = 1, max = 36500, message = "Interval must be between 1 and 36500 days"))]
    pub maintenance_interval_days: Option<i32>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub last_maintenance_date: Option<String>,
}

/// Schedule line for one asset
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssetSchedule {
    pub asset_id: i32,
    pub name: String,
    pub last_maintenance_date: Option<NaiveDate>,
    pub next_due: Option<NaiveDate>,
    /// Absent when the asset has no maintenance interval
    pub status: Option<ScheduleStatus>,
}

/// Append-only service record of one asset
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceLog {
    pub id: i32,
    pub asset_id: i32,
    pub maintenance_date: Option<NaiveDate>,
    pub maintenance_type: Option<String>,
    pub description: Option<String>,
    pub cost: Decimal,
    pub performed_by: Option<String>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MaintenanceLogDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub log: MaintenanceLog,
    pub asset_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MaintenanceLogQuery {
    pub asset_id: Option<i32>,
    /// Range start (YYYY-MM-DD), used together with `to`
    pub from: Option<String>,
    /// Range end (YYYY-MM-DD), used together with `from`
    pub to: Option<String>,
    #[serde(rename = "type")]
    pub maintenance_type: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMaintenanceLog {
    pub asset_id: i32,
    /// Service date (YYYY-MM-DD); also becomes the asset's last maintenance date
    pub maintenance_date: Option<String>,
    pub maintenance_type: Option<String>,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub performed_by: Option<String>,
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(interval: Option<i32>) -> CreateAsset {
        CreateAsset {
            name: "Boiler".to_string(),
            category: None,
            asset_code: None,
            purchase_date: None,
            warranty_expiry: None,
            maintenance_interval_days: interval,
            status: None,
            notes: None,
            last_maintenance_date: None,
        }
    }

    #[test]
    fn test_interval_bounds() {
        assert!(create(Some(30)).validate().is_ok());
        assert!(create(None).validate().is_ok());
        assert!(create(Some(0)).validate().is_err());
        assert!(create(Some(200_000_000)).validate().is_err());

        let update = UpdateAsset {
            maintenance_interval_days: Some(36_501),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
