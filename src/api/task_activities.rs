//! Task activity API endpoints
//!
//! Activities are addressed by the ID of their maintenance request.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::task_activity::{CompleteTask, CompletedTask, TaskActivity, TaskProgress},
};

/// Activity of a request (null until work starts)
#[utoipa::path(
    get,
    path = "/task-activities/request/{id}",
    tag = "task-activities",
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Task activity or null", body = Option<TaskActivity>)
    )
)]
pub async fn get_task_activity(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Option<TaskActivity>>> {
    let activity = state.services.tasks.get(id).await?;
    Ok(Json(activity))
}

/// Start work: stamps the start time and moves the request to In Progress
#[utoipa::path(
    post,
    path = "/task-activities/{id}/start",
    tag = "task-activities",
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Task started", body = TaskActivity),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn start_task(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<TaskActivity>> {
    let activity = state.services.tasks.start(id).await?;
    Ok(Json(activity))
}

/// Record work notes on a started task
#[utoipa::path(
    patch,
    path = "/task-activities/{id}/progress",
    tag = "task-activities",
    params(("id" = i32, Path, description = "Request ID")),
    request_body = TaskProgress,
    responses(
        (status = 200, description = "Progress recorded", body = TaskActivity),
        (status = 404, description = "Task not started", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_progress(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<TaskProgress>,
) -> AppResult<Json<TaskActivity>> {
    let activity = state.services.tasks.update_progress(id, &data).await?;
    Ok(Json(activity))
}

/// Finish work: stamps the finish time, derives the duration and moves the request to Repaired
#[utoipa::path(
    post,
    path = "/task-activities/{id}/complete",
    tag = "task-activities",
    params(("id" = i32, Path, description = "Request ID")),
    request_body = CompleteTask,
    responses(
        (status = 200, description = "Task completed", body = TaskActivity),
        (status = 404, description = "Request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn complete_task(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<CompleteTask>,
) -> AppResult<Json<TaskActivity>> {
    let activity = state.services.tasks.complete(id, &data).await?;
    Ok(Json(activity))
}

/// Finished tasks, latest first
#[utoipa::path(
    get,
    path = "/task-activities/completed",
    tag = "task-activities",
    responses(
        (status = 200, description = "Completed tasks", body = Vec<CompletedTask>)
    )
)]
pub async fn list_completed(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<CompletedTask>>> {
    let tasks = state.services.reports.completed_tasks().await?;
    Ok(Json(tasks))
}
