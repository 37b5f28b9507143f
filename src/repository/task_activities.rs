//! Task activity domain methods on Repository

use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::Stage,
        task_activity::{CompletedTask, TaskActivity, TaskCompletion, TaskProgress},
    },
};

/// Stage write shared by start and complete; fails when the request is absent
async fn set_stage_in(tx: &mut Transaction<'_, Postgres>, request_id: i32, stage: Stage) -> AppResult<()> {
    let updated = sqlx::query("UPDATE maintenance_requests SET stage = $1 WHERE id = $2")
        .bind(stage)
        .bind(request_id)
        .execute(&mut **tx)
        .await?;
    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Maintenance request {} not found", request_id)));
    }
    Ok(())
}

impl Repository {
    pub async fn tasks_get_by_request(&self, request_id: i32) -> AppResult<Option<TaskActivity>> {
        let row = sqlx::query_as::<_, TaskActivity>(
            "SELECT * FROM task_activities WHERE request_id = $1"
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Record the start time (creating the activity if needed) and move the request to `stage`
    pub async fn tasks_start(
        &self,
        request_id: i32,
        stage: Stage,
        started_at: DateTime<Utc>,
    ) -> AppResult<TaskActivity> {
        let mut tx = self.pool.begin().await?;

        set_stage_in(&mut tx, request_id, stage).await?;

        let activity = sqlx::query_as::<_, TaskActivity>(
            r#"
            INSERT INTO task_activities (request_id, actual_start_time)
            VALUES ($1, $2)
            ON CONFLICT (request_id) DO UPDATE SET actual_start_time = EXCLUDED.actual_start_time
            RETURNING *
            "#,
        )
        .bind(request_id)
        .bind(started_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(activity)
    }

    /// Overwrite the progress notes of an existing activity
    pub async fn tasks_update_progress(
        &self,
        request_id: i32,
        progress: &TaskProgress,
    ) -> AppResult<Option<TaskActivity>> {
        let row = sqlx::query_as::<_, TaskActivity>(
            r#"
            UPDATE task_activities
            SET work_context = $1, observations = $2, parts_used = $3
            WHERE request_id = $4
            RETURNING *
            "#,
        )
        .bind(&progress.work_context)
        .bind(&progress.observations)
        .bind(&progress.parts_used)
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Write finish time, duration, rating and feedback, and move the request to its completion stage
    pub async fn tasks_complete(
        &self,
        request_id: i32,
        completion: &TaskCompletion,
    ) -> AppResult<TaskActivity> {
        let mut tx = self.pool.begin().await?;

        set_stage_in(&mut tx, request_id, completion.stage).await?;

        let activity = sqlx::query_as::<_, TaskActivity>(
            r#"
            INSERT INTO task_activities (
                request_id, actual_finish_time, total_time_minutes, performance_rating, feedback
            )
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (request_id) DO UPDATE SET
                actual_finish_time = EXCLUDED.actual_finish_time,
                total_time_minutes = EXCLUDED.total_time_minutes,
                performance_rating = EXCLUDED.performance_rating,
                feedback = EXCLUDED.feedback
            RETURNING *
            "#,
        )
        .bind(request_id)
        .bind(completion.finished_at)
        .bind(completion.total_time_minutes)
        .bind(completion.performance_rating)
        .bind(&completion.feedback)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(activity)
    }

    /// Finished activities joined with their request, latest finish first
    pub async fn tasks_list_completed(&self) -> AppResult<Vec<CompletedTask>> {
        let rows = sqlx::query_as::<_, CompletedTask>(
            r#"
            SELECT ta.*, mr.subject, mr.request_type,
                   e.name AS equipment_name,
                   tm.name AS technician_name
            FROM task_activities ta
            JOIN maintenance_requests mr ON ta.request_id = mr.id
            JOIN equipment e ON mr.equipment_id = e.id
            LEFT JOIN team_members tm ON mr.assigned_technician_id = tm.id
            WHERE ta.actual_finish_time IS NOT NULL
            ORDER BY ta.actual_finish_time DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
