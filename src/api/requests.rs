//! Maintenance request API endpoints

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::maintenance_request::{
        CreateMaintenanceRequest, MaintenanceRequest, MaintenanceRequestDetails,
        MaintenanceRequestQuery, UpdateMaintenanceRequest, UpdateStage,
    },
    services::requests::KanbanBoard,
};

/// List requests, newest first
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(MaintenanceRequestQuery),
    responses(
        (status = 200, description = "Request list", body = Vec<MaintenanceRequestDetails>)
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    Query(query): Query<MaintenanceRequestQuery>,
) -> AppResult<Json<Vec<MaintenanceRequestDetails>>> {
    let requests = state.services.requests.list(&query).await?;
    Ok(Json(requests))
}

/// Requests grouped by stage
#[utoipa::path(
    get,
    path = "/requests/kanban",
    tag = "requests",
    responses(
        (status = 200, description = "One column per stage: New, In Progress, Repaired, Scrap",
         body = HashMap<String, Vec<MaintenanceRequestDetails>>)
    )
)]
pub async fn kanban(State(state): State<crate::AppState>) -> AppResult<Json<KanbanBoard>> {
    let board = state.services.requests.kanban().await?;
    Ok(Json(board))
}

/// Preventive requests ordered by scheduled date
#[utoipa::path(
    get,
    path = "/requests/preventive",
    tag = "requests",
    responses(
        (status = 200, description = "Preventive calendar", body = Vec<MaintenanceRequestDetails>)
    )
)]
pub async fn preventive_calendar(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<MaintenanceRequestDetails>>> {
    let requests = state.services.requests.preventive_calendar().await?;
    Ok(Json(requests))
}

/// Get request by ID
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request details", body = MaintenanceRequestDetails),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceRequestDetails>> {
    let request = state.services.requests.get(id).await?;
    Ok(Json(request))
}

/// Raise a maintenance request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    request_body = CreateMaintenanceRequest,
    responses(
        (status = 201, description = "Request created in stage New", body = MaintenanceRequest),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateMaintenanceRequest>,
) -> AppResult<(StatusCode, Json<MaintenanceRequest>)> {
    let request = state.services.requests.create(&data).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Update request fields (partial, stage excluded)
#[utoipa::path(
    put,
    path = "/requests/{id}",
    tag = "requests",
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateMaintenanceRequest,
    responses(
        (status = 200, description = "Request updated", body = MaintenanceRequest),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_request(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMaintenanceRequest>,
) -> AppResult<Json<MaintenanceRequest>> {
    let request = state.services.requests.update(id, &data).await?;
    Ok(Json(request))
}

/// Move a request to another stage; Scrap also scraps the equipment
#[utoipa::path(
    patch,
    path = "/requests/{id}/stage",
    tag = "requests",
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateStage,
    responses(
        (status = 200, description = "Stage updated", body = MaintenanceRequest),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_stage(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateStage>,
) -> AppResult<Json<MaintenanceRequest>> {
    let request = state.services.lifecycle.move_to_stage(id, data.stage).await?;
    Ok(Json(request))
}

/// Scrap a request and its equipment
#[utoipa::path(
    post,
    path = "/requests/{id}/scrap",
    tag = "requests",
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request and equipment scrapped", body = MaintenanceRequest),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn scrap_request(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceRequest>> {
    let request = state.services.lifecycle.scrap(id).await?;
    Ok(Json(request))
}
