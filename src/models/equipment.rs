//! Equipment model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::EquipmentStatus;

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub serial_number: Option<String>,
    pub category: Option<String>,
    pub department: Option<String>,
    pub assigned_employee: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub physical_location: Option<String>,
    /// Owning maintenance team
    pub maintenance_team_id: Option<i32>,
    /// Preferred assignee for new requests
    pub default_technician_id: Option<i32>,
    pub status: EquipmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Equipment row as shown in listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EquipmentSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub equipment: Equipment,
    pub team_name: Option<String>,
    pub technician_name: Option<String>,
    /// Requests not yet Repaired or Scrap
    pub open_requests: i64,
}

/// Equipment list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct EquipmentQuery {
    pub status: Option<EquipmentStatus>,
    pub category: Option<String>,
    pub department: Option<String>,
    /// Substring match on name or serial number
    pub search: Option<String>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub serial_number: Option<String>,
    pub category: Option<String>,
    pub department: Option<String>,
    pub assigned_employee: Option<String>,
    /// Purchase date (YYYY-MM-DD)
    pub purchase_date: Option<String>,
    /// Warranty expiry (YYYY-MM-DD)
    pub warranty_expiry: Option<String>,
    pub physical_location: Option<String>,
    pub maintenance_team_id: Option<i32>,
    pub default_technician_id: Option<i32>,
    pub status: Option<EquipmentStatus>,
    pub notes: Option<String>,
}

/// Update equipment request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub category: Option<String>,
    pub department: Option<String>,
    pub assigned_employee: Option<String>,
    pub purchase_date: Option<String>,
    pub warranty_expiry: Option<String>,
    pub physical_location: Option<String>,
    pub maintenance_team_id: Option<i32>,
    pub default_technician_id: Option<i32>,
    pub status: Option<EquipmentStatus>,
    pub notes: Option<String>,
}

/// Manual status change
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEquipmentStatus {
    pub status: EquipmentStatus,
}
