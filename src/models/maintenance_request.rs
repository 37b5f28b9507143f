//! Maintenance request model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{Priority, RequestType, Stage};

/// Maintenance request as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceRequest {
    pub id: i32,
    pub subject: String,
    pub equipment_id: i32,
    pub request_type: RequestType,
    pub priority: Priority,
    pub stage: Stage,
    pub assigned_technician_id: Option<i32>,
    pub scheduled_date: Option<NaiveDate>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request joined with equipment, technician and team names
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MaintenanceRequestDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub request: MaintenanceRequest,
    pub equipment_name: Option<String>,
    pub equipment_category: Option<String>,
    pub technician_name: Option<String>,
    pub team_name: Option<String>,
    pub performance_rating: Option<i16>,
    /// Scheduled date has passed and the request is still open
    #[sqlx(skip)]
    pub is_overdue: bool,
}

/// Request list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MaintenanceRequestQuery {
    pub stage: Option<Stage>,
    pub request_type: Option<RequestType>,
    pub equipment_id: Option<i32>,
    pub technician_id: Option<i32>,
}

/// Create request payload; stage always starts at New
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenanceRequest {
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    pub equipment_id: i32,
    pub request_type: RequestType,
    pub priority: Option<Priority>,
    /// Defaults to the equipment's default technician
    pub assigned_technician_id: Option<i32>,
    /// Scheduled date (YYYY-MM-DD)
    pub scheduled_date: Option<String>,
    pub created_by: Option<String>,
}

/// Partial update; the stage has its own endpoint
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMaintenanceRequest {
    #[validate(length(min = 1, message = "Subject cannot be empty"))]
    pub subject: Option<String>,
    pub request_type: Option<RequestType>,
    pub priority: Option<Priority>,
    /// Absent keeps the technician, `null` unassigns
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub assigned_technician_id: Option<Option<i32>>,
    /// Absent keeps the date, `null` clears it
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub scheduled_date: Option<Option<String>>,
}

/// Stage change (kanban drag and drop)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStage {
    pub stage: Stage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_distinguishes_absent_from_null() {
        let untouched: UpdateMaintenanceRequest = serde_json::from_str(r#"{"subject": "Belt"}"#).unwrap();
        assert_eq!(untouched.assigned_technician_id, None);
        assert_eq!(untouched.scheduled_date, None);

        let cleared: UpdateMaintenanceRequest =
            serde_json::from_str(r#"{"assigned_technician_id": null, "scheduled_date": null}"#).unwrap();
        assert_eq!(cleared.assigned_technician_id, Some(None));
        assert_eq!(cleared.scheduled_date, Some(None));

        let set: UpdateMaintenanceRequest =
            serde_json::from_str(r#"{"assigned_technician_id": 4, "scheduled_date": "2024-06-01"}"#).unwrap();
        assert_eq!(set.assigned_technician_id, Some(Some(4)));
        assert_eq!(set.scheduled_date, Some(Some("2024-06-01".to_string())));
    }
}
