//! Repository layer for database operations

pub mod assets;
pub mod equipment;
pub mod reports;
pub mod requests;
pub mod task_activities;
pub mod teams;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        enums::Stage,
        maintenance_request::MaintenanceRequest,
        task_activity::{TaskActivity, TaskCompletion, TaskProgress},
    },
};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Round-trip to the database for the readiness check
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Storage operations driven by the request lifecycle and task workflow.
///
/// Each multi-write method runs in a single transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    async fn get_request(&self, id: i32) -> AppResult<MaintenanceRequest>;

    /// Overwrite the stage without side effects
    async fn set_stage(&self, id: i32, stage: Stage) -> AppResult<MaintenanceRequest>;

    /// Move the request to Scrap and mark its equipment as Scrap
    async fn scrap_request(&self, id: i32) -> AppResult<MaintenanceRequest>;

    async fn get_task(&self, request_id: i32) -> AppResult<Option<TaskActivity>>;

    /// Upsert the activity start time and move the request to `stage`
    async fn start_task(
        &self,
        request_id: i32,
        stage: Stage,
        started_at: DateTime<Utc>,
    ) -> AppResult<TaskActivity>;

    /// Overwrite progress notes; `None` when no activity exists
    async fn update_task_progress(
        &self,
        request_id: i32,
        progress: &TaskProgress,
    ) -> AppResult<Option<TaskActivity>>;

    /// Upsert the completion values and move the request to `completion.stage`
    async fn complete_task(
        &self,
        request_id: i32,
        completion: &TaskCompletion,
    ) -> AppResult<TaskActivity>;
}

#[async_trait]
impl MaintenanceStore for Repository {
    async fn get_request(&self, id: i32) -> AppResult<MaintenanceRequest> {
        self.requests_get_by_id(id).await
    }

    async fn set_stage(&self, id: i32, stage: Stage) -> AppResult<MaintenanceRequest> {
        self.requests_set_stage(id, stage).await
    }

    async fn scrap_request(&self, id: i32) -> AppResult<MaintenanceRequest> {
        self.requests_scrap(id).await
    }

    async fn get_task(&self, request_id: i32) -> AppResult<Option<TaskActivity>> {
        self.tasks_get_by_request(request_id).await
    }

    async fn start_task(
        &self,
        request_id: i32,
        stage: Stage,
        started_at: DateTime<Utc>,
    ) -> AppResult<TaskActivity> {
        self.tasks_start(request_id, stage, started_at).await
    }

    async fn update_task_progress(
        &self,
        request_id: i32,
        progress: &TaskProgress,
    ) -> AppResult<Option<TaskActivity>> {
        self.tasks_update_progress(request_id, progress).await
    }

    async fn complete_task(
        &self,
        request_id: i32,
        completion: &TaskCompletion,
    ) -> AppResult<TaskActivity> {
        self.tasks_complete(request_id, completion).await
    }
}
