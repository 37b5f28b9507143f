//! Report and dashboard payloads

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use super::asset::MaintenanceLogDetails;
use super::enums::Stage;

/// Per-equipment request history
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EquipmentHistoryRow {
    pub equipment_id: i32,
    pub equipment_name: String,
    pub category: Option<String>,
    pub department: Option<String>,
    pub total_requests: i64,
    pub preventive_count: i64,
    pub corrective_count: i64,
    pub completed_count: i64,
    /// Mean task duration in minutes
    pub avg_repair_time: Option<f64>,
    pub avg_rating: Option<f64>,
}

/// Per-equipment cost totals from legacy maintenance logs
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MaintenanceCostRow {
    pub equipment_id: i32,
    pub equipment_name: String,
    pub category: Option<String>,
    pub maintenance_count: i64,
    pub total_cost: Decimal,
    pub avg_cost: Decimal,
    pub max_cost: Decimal,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TechnicianPerformanceRow {
    pub technician_id: i32,
    pub technician_name: String,
    pub team_name: Option<String>,
    pub total_assignments: i64,
    pub completed_tasks: i64,
    pub avg_completion_time: Option<f64>,
    pub avg_rating: Option<f64>,
    pub overdue_tasks: i64,
}

/// Corrective work per equipment
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct DowntimeRow {
    pub equipment_id: i32,
    pub equipment_name: String,
    pub category: Option<String>,
    pub department: Option<String>,
    pub breakdown_count: i64,
    pub total_downtime_minutes: i64,
    pub avg_downtime_minutes: Option<f64>,
}

/// Preventive vs. corrective split over all requests
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MaintenanceRatio {
    pub preventive_count: i64,
    pub corrective_count: i64,
    pub total_requests: i64,
    pub preventive_percentage: f64,
    pub corrective_percentage: f64,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RecentActivity {
    pub request_id: i32,
    pub subject: String,
    pub stage: Stage,
    pub created_at: DateTime<Utc>,
    pub equipment_name: Option<String>,
    pub technician_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub total_equipment: i64,
    /// Requests not yet Repaired or Scrap
    pub open_requests: i64,
    pub overdue_tasks: i64,
    pub completed_tasks: i64,
    pub recent_activities: Vec<RecentActivity>,
}

/// Dashboard over the legacy assets and logs
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LegacyDashboard {
    pub total_assets: i64,
    pub maintenance_due: i64,
    pub overdue_maintenance: i64,
    pub completed_maintenance: i64,
    pub recent: Vec<MaintenanceLogDetails>,
}
