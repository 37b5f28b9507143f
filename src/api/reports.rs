//! Reports and dashboard endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::report::{
        DashboardSummary, DowntimeRow, EquipmentHistoryRow, MaintenanceCostRow, MaintenanceRatio,
        TechnicianPerformanceRow,
    },
};

#[utoipa::path(
    get,
    path = "/reports/dashboard",
    tag = "reports",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary)
    )
)]
pub async fn dashboard(State(state): State<crate::AppState>) -> AppResult<Json<DashboardSummary>> {
    let summary = state.services.reports.dashboard().await?;
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/reports/equipment-history",
    tag = "reports",
    responses(
        (status = 200, description = "Request history per equipment", body = Vec<EquipmentHistoryRow>)
    )
)]
pub async fn equipment_history(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<EquipmentHistoryRow>>> {
    let rows = state.services.reports.equipment_history().await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/reports/maintenance-costs",
    tag = "reports",
    responses(
        (status = 200, description = "Log costs per equipment", body = Vec<MaintenanceCostRow>)
    )
)]
pub async fn maintenance_costs(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<MaintenanceCostRow>>> {
    let rows = state.services.reports.maintenance_costs().await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/reports/technician-performance",
    tag = "reports",
    responses(
        (status = 200, description = "Performance per technician", body = Vec<TechnicianPerformanceRow>)
    )
)]
pub async fn technician_performance(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<TechnicianPerformanceRow>>> {
    let rows = state.services.reports.technician_performance().await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/reports/downtime",
    tag = "reports",
    responses(
        (status = 200, description = "Corrective downtime per equipment", body = Vec<DowntimeRow>)
    )
)]
pub async fn downtime(State(state): State<crate::AppState>) -> AppResult<Json<Vec<DowntimeRow>>> {
    let rows = state.services.reports.downtime().await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/reports/maintenance-ratio",
    tag = "reports",
    responses(
        (status = 200, description = "Preventive vs corrective split", body = MaintenanceRatio)
    )
)]
pub async fn maintenance_ratio(
    State(state): State<crate::AppState>,
) -> AppResult<Json<MaintenanceRatio>> {
    let ratio = state.services.reports.maintenance_ratio().await?;
    Ok(Json(ratio))
}
