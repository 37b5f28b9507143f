//! Equipment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        equipment::{
            CreateEquipment, Equipment, EquipmentQuery, EquipmentSummary, UpdateEquipment,
            UpdateEquipmentStatus,
        },
        maintenance_request::MaintenanceRequestDetails,
    },
};

/// List equipment with team, default technician and open request count
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment list", body = Vec<EquipmentSummary>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<Vec<EquipmentSummary>>> {
    let equipment = state.services.equipment.list(&query).await?;
    Ok(Json(equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Register equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse),
        (status = 409, description = "Duplicate serial number", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let equipment = state.services.equipment.create(&data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment (partial)
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(id, &data).await?;
    Ok(Json(equipment))
}

/// Set equipment status
#[utoipa::path(
    patch,
    path = "/equipment/{id}/status",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipmentStatus,
    responses(
        (status = 200, description = "Status updated", body = Equipment),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_equipment_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipmentStatus>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.set_status(id, data.status).await?;
    Ok(Json(equipment))
}

/// Maintenance requests raised against a piece of equipment
#[utoipa::path(
    get,
    path = "/equipment/{id}/requests",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Request history", body = Vec<MaintenanceRequestDetails>),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_equipment_requests(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<MaintenanceRequestDetails>>> {
    let requests = state.services.requests.list_for_equipment(id).await?;
    Ok(Json(requests))
}
