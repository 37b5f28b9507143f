//! Legacy asset and maintenance log endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        asset::{
            Asset, AssetQuery, AssetSchedule, CreateAsset, CreateMaintenanceLog, MaintenanceLog,
            MaintenanceLogDetails, MaintenanceLogQuery, UpdateAsset,
        },
        report::LegacyDashboard,
    },
};

/// List live assets, newest first
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    params(AssetQuery),
    responses(
        (status = 200, description = "Asset list", body = Vec<Asset>)
    )
)]
pub async fn list_assets(
    State(state): State<crate::AppState>,
    Query(query): Query<AssetQuery>,
) -> AppResult<Json<Vec<Asset>>> {
    let assets = state.services.legacy.list_assets(&query).await?;
    Ok(Json(assets))
}

#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset details", body = Asset),
        (status = 404, description = "Asset not found or deleted", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Asset>> {
    let asset = state.services.legacy.get_asset(id).await?;
    Ok(Json(asset))
}

#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    request_body = CreateAsset,
    responses(
        (status = 201, description = "Asset created", body = Asset),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_asset(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAsset>,
) -> AppResult<(StatusCode, Json<Asset>)> {
    let asset = state.services.legacy.create_asset(&data).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = UpdateAsset,
    responses(
        (status = 200, description = "Asset updated", body = Asset),
        (status = 404, description = "Asset not found or deleted", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAsset>,
) -> AppResult<Json<Asset>> {
    let asset = state.services.legacy.update_asset(id, &data).await?;
    Ok(Json(asset))
}

/// Soft delete an asset
#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 404, description = "Asset not found or already deleted", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.legacy.delete_asset(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Next service date and status of every live asset
#[utoipa::path(
    get,
    path = "/assets/schedule",
    tag = "assets",
    responses(
        (status = 200, description = "Maintenance schedule", body = Vec<AssetSchedule>)
    )
)]
pub async fn asset_schedule(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<AssetSchedule>>> {
    let schedule = state.services.legacy.schedule().await?;
    Ok(Json(schedule))
}

/// Asset dashboard: due and overdue counts plus the latest logs
#[utoipa::path(
    get,
    path = "/assets/dashboard",
    tag = "assets",
    responses(
        (status = 200, description = "Asset dashboard", body = LegacyDashboard)
    )
)]
pub async fn asset_dashboard(
    State(state): State<crate::AppState>,
) -> AppResult<Json<LegacyDashboard>> {
    let dashboard = state.services.legacy.dashboard().await?;
    Ok(Json(dashboard))
}

/// List maintenance logs, latest service date first
#[utoipa::path(
    get,
    path = "/maintenance-logs",
    tag = "assets",
    params(MaintenanceLogQuery),
    responses(
        (status = 200, description = "Maintenance logs", body = Vec<MaintenanceLogDetails>),
        (status = 400, description = "Malformed date", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_logs(
    State(state): State<crate::AppState>,
    Query(query): Query<MaintenanceLogQuery>,
) -> AppResult<Json<Vec<MaintenanceLogDetails>>> {
    let logs = state.services.legacy.list_logs(&query).await?;
    Ok(Json(logs))
}

/// Record a service event on an asset
#[utoipa::path(
    post,
    path = "/maintenance-logs",
    tag = "assets",
    request_body = CreateMaintenanceLog,
    responses(
        (status = 201, description = "Log recorded", body = MaintenanceLog),
        (status = 404, description = "Asset not found or deleted", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_log(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateMaintenanceLog>,
) -> AppResult<(StatusCode, Json<MaintenanceLog>)> {
    let log = state.services.legacy.create_log(&data).await?;
    Ok((StatusCode::CREATED, Json(log)))
}
