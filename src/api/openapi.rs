//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assets, equipment, health, reports, requests, task_activities, teams};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GearGuard API",
        version = "1.0.0",
        description = "Maintenance tracking REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::update_equipment_status,
        equipment::list_equipment_requests,
        // Teams
        teams::list_teams,
        teams::get_team,
        teams::create_team,
        teams::update_team,
        teams::list_team_members,
        teams::add_team_member,
        teams::get_team_member,
        teams::update_team_member,
        // Requests
        requests::list_requests,
        requests::kanban,
        requests::preventive_calendar,
        requests::get_request,
        requests::create_request,
        requests::update_request,
        requests::update_stage,
        requests::scrap_request,
        // Task activities
        task_activities::get_task_activity,
        task_activities::start_task,
        task_activities::update_progress,
        task_activities::complete_task,
        task_activities::list_completed,
        // Legacy assets
        assets::list_assets,
        assets::get_asset,
        assets::create_asset,
        assets::update_asset,
        assets::delete_asset,
        assets::asset_schedule,
        assets::asset_dashboard,
        assets::list_logs,
        assets::create_log,
        // Reports
        reports::dashboard,
        reports::equipment_history,
        reports::maintenance_costs,
        reports::technician_performance,
        reports::downtime,
        reports::maintenance_ratio,
    ),
    components(
        schemas(
            // Enums
            crate::models::enums::Stage,
            crate::models::enums::RequestType,
            crate::models::enums::Priority,
            crate::models::enums::EquipmentStatus,
            crate::models::enums::ScheduleStatus,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentSummary,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::UpdateEquipmentStatus,
            // Teams
            crate::models::team::Team,
            crate::models::team::TeamSummary,
            crate::models::team::CreateTeam,
            crate::models::team::UpdateTeam,
            crate::models::team::TeamMember,
            crate::models::team::CreateTeamMember,
            crate::models::team::UpdateTeamMember,
            // Requests
            crate::models::maintenance_request::MaintenanceRequest,
            crate::models::maintenance_request::MaintenanceRequestDetails,
            crate::models::maintenance_request::CreateMaintenanceRequest,
            crate::models::maintenance_request::UpdateMaintenanceRequest,
            crate::models::maintenance_request::UpdateStage,
            // Task activities
            crate::models::task_activity::TaskActivity,
            crate::models::task_activity::TaskProgress,
            crate::models::task_activity::CompleteTask,
            crate::models::task_activity::CompletedTask,
            // Legacy assets
            crate::models::asset::Asset,
            crate::models::asset::CreateAsset,
            crate::models::asset::UpdateAsset,
            crate::models::asset::AssetSchedule,
            crate::models::asset::MaintenanceLog,
            crate::models::asset::MaintenanceLogDetails,
            crate::models::asset::CreateMaintenanceLog,
            // Reports
            crate::models::report::EquipmentHistoryRow,
            crate::models::report::MaintenanceCostRow,
            crate::models::report::TechnicianPerformanceRow,
            crate::models::report::DowntimeRow,
            crate::models::report::MaintenanceRatio,
            crate::models::report::RecentActivity,
            crate::models::report::DashboardSummary,
            crate::models::report::LegacyDashboard,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment registry"),
        (name = "teams", description = "Maintenance teams and technicians"),
        (name = "requests", description = "Maintenance requests and their lifecycle"),
        (name = "task-activities", description = "Task execution records"),
        (name = "assets", description = "Legacy assets and maintenance logs"),
        (name = "reports", description = "Reports and dashboards")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_lifecycle_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/requests/{id}/stage"));
        assert!(paths.contains_key("/requests/{id}/scrap"));
        assert!(paths.contains_key("/task-activities/{id}/complete"));
        assert!(paths.contains_key("/reports/maintenance-ratio"));
    }
}
