//! Task activity workflow: start, record progress, complete

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::task_activity::{CompleteTask, TaskActivity, TaskCompletion, TaskProgress},
    repository::MaintenanceStore,
    services::lifecycle::StageTrigger,
};

/// Whole minutes between start and finish, rounded half away from zero.
/// A task completed without a start time took 0 minutes.
pub fn elapsed_minutes(started_at: Option<DateTime<Utc>>, finished_at: DateTime<Utc>) -> i32 {
    let Some(start) = started_at else {
        return 0;
    };
    let millis = (finished_at - start).num_milliseconds().max(0);
    (millis as f64 / 60_000.0).round() as i32
}

#[derive(Clone)]
pub struct TaskActivityService {
    store: Arc<dyn MaintenanceStore>,
}

impl TaskActivityService {
    pub fn new(store: Arc<dyn MaintenanceStore>) -> Self {
        Self { store }
    }

    /// Activity of a request, if work has been recorded
    pub async fn get(&self, request_id: i32) -> AppResult<Option<TaskActivity>> {
        self.store.get_task(request_id).await
    }

    pub async fn start(&self, request_id: i32) -> AppResult<TaskActivity> {
        self.start_at(request_id, Utc::now()).await
    }

    /// Stamp the start time and move the request to In Progress.
    /// Restarting overwrites the start time and keeps everything else.
    pub async fn start_at(&self, request_id: i32, now: DateTime<Utc>) -> AppResult<TaskActivity> {
        let stage = StageTrigger::TaskStarted.target();
        let activity = self.store.start_task(request_id, stage, now).await?;
        tracing::info!("Task started for request {}", request_id);
        Ok(activity)
    }

    pub async fn update_progress(&self, request_id: i32, progress: &TaskProgress) -> AppResult<TaskActivity> {
        self.store
            .update_task_progress(request_id, progress)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No task activity for request {}; start the task first",
                    request_id
                ))
            })
    }

    pub async fn complete(&self, request_id: i32, data: &CompleteTask) -> AppResult<TaskActivity> {
        self.complete_at(request_id, data, Utc::now()).await
    }

    /// Stamp the finish time, derive the duration and move the request to Repaired
    pub async fn complete_at(
        &self,
        request_id: i32,
        data: &CompleteTask,
        now: DateTime<Utc>,
    ) -> AppResult<TaskActivity> {
        let started_at = self
            .store
            .get_task(request_id)
            .await?
            .and_then(|activity| activity.actual_start_time);

        let completion = TaskCompletion {
            stage: StageTrigger::TaskCompleted.target(),
            finished_at: now,
            total_time_minutes: elapsed_minutes(started_at, now),
            performance_rating: data.performance_rating,
            feedback: data.feedback.clone(),
        };

        let activity = self.store.complete_task(request_id, &completion).await?;
        tracing::info!(
            "Task completed for request {} in {} min",
            request_id,
            completion.total_time_minutes
        );
        Ok(activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::enums::Stage, repository::MockMaintenanceStore};
    use chrono::{Duration, TimeZone};
    use mockall::predicate::eq;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, h, m, s).unwrap()
    }

    fn activity(request_id: i32, started: Option<DateTime<Utc>>) -> TaskActivity {
        TaskActivity {
            id: 1,
            request_id,
            actual_start_time: started,
            actual_finish_time: None,
            total_time_minutes: None,
            work_context: None,
            observations: None,
            parts_used: None,
            performance_rating: None,
            feedback: None,
        }
    }

    #[test]
    fn test_elapsed_minutes() {
        assert_eq!(elapsed_minutes(Some(at(9, 0, 0)), at(10, 30, 0)), 90);
        assert_eq!(elapsed_minutes(Some(at(9, 0, 0)), at(9, 0, 29)), 0);
        assert_eq!(elapsed_minutes(Some(at(9, 0, 0)), at(9, 0, 30)), 1);
        assert_eq!(elapsed_minutes(Some(at(9, 0, 0)), at(9, 2, 31)), 3);
    }

    #[test]
    fn test_elapsed_minutes_without_start_is_zero() {
        assert_eq!(elapsed_minutes(None, at(10, 0, 0)), 0);
    }

    #[test]
    fn test_elapsed_minutes_never_negative() {
        assert_eq!(elapsed_minutes(Some(at(10, 0, 0)), at(9, 0, 0)), 0);
    }

    #[tokio::test]
    async fn test_start_stamps_now() {
        let now = at(9, 0, 0);
        let mut store = MockMaintenanceStore::new();
        store
            .expect_start_task()
            .with(eq(12), eq(Stage::InProgress), eq(now))
            .times(1)
            .returning(|id, _, started| Ok(activity(id, Some(started))));

        let service = TaskActivityService::new(Arc::new(store));
        let started = service.start_at(12, now).await.unwrap();
        assert_eq!(started.actual_start_time, Some(now));
    }

    #[tokio::test]
    async fn test_complete_after_start_records_duration() {
        let mut store = MockMaintenanceStore::new();
        store
            .expect_get_task()
            .with(eq(12))
            .returning(|id| Ok(Some(activity(id, Some(at(9, 0, 0))))));
        store
            .expect_complete_task()
            .withf(|id, completion| {
                *id == 12
                    && completion.stage == Stage::Repaired
                    && completion.total_time_minutes == 90
                    && completion.finished_at == at(10, 30, 0)
                    && completion.performance_rating == Some(5)
                    && completion.feedback.as_deref() == Some("Clean job")
            })
            .times(1)
            .returning(|id, completion| {
                let mut done = activity(id, Some(at(9, 0, 0)));
                done.actual_finish_time = Some(completion.finished_at);
                done.total_time_minutes = Some(completion.total_time_minutes);
                done.performance_rating = completion.performance_rating;
                done.feedback = completion.feedback.clone();
                Ok(done)
            });

        let service = TaskActivityService::new(Arc::new(store));
        let data = CompleteTask {
            performance_rating: Some(5),
            feedback: Some("Clean job".to_string()),
        };
        let done = service.complete_at(12, &data, at(10, 30, 0)).await.unwrap();
        assert_eq!(done.total_time_minutes, Some(90));
        assert_eq!(done.performance_rating, Some(5));
    }

    #[tokio::test]
    async fn test_complete_without_start_records_zero_minutes() {
        let mut store = MockMaintenanceStore::new();
        store.expect_get_task().returning(|_| Ok(None));
        store
            .expect_complete_task()
            .withf(|_, completion| completion.total_time_minutes == 0)
            .times(1)
            .returning(|id, completion| {
                let mut done = activity(id, None);
                done.actual_finish_time = Some(completion.finished_at);
                done.total_time_minutes = Some(0);
                Ok(done)
            });

        let service = TaskActivityService::new(Arc::new(store));
        let done = service
            .complete_at(3, &CompleteTask::default(), at(11, 0, 0))
            .await
            .unwrap();
        assert_eq!(done.total_time_minutes, Some(0));
        assert_eq!(done.actual_start_time, None);
    }

    #[tokio::test]
    async fn test_progress_without_activity_is_not_found() {
        let mut store = MockMaintenanceStore::new();
        store.expect_update_task_progress().returning(|_, _| Ok(None));

        let service = TaskActivityService::new(Arc::new(store));
        let result = service.update_progress(8, &TaskProgress::default()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_progress_overwrites_notes() {
        let mut store = MockMaintenanceStore::new();
        store
            .expect_update_task_progress()
            .withf(|id, progress| *id == 8 && progress.parts_used.as_deref() == Some("2x gasket"))
            .returning(|id, progress| {
                let mut updated = activity(id, Some(at(9, 0, 0) - Duration::hours(1)));
                updated.work_context = progress.work_context.clone();
                updated.observations = progress.observations.clone();
                updated.parts_used = progress.parts_used.clone();
                Ok(Some(updated))
            });

        let service = TaskActivityService::new(Arc::new(store));
        let progress = TaskProgress {
            work_context: Some("Replaced seals".to_string()),
            observations: None,
            parts_used: Some("2x gasket".to_string()),
        };
        let updated = service.update_progress(8, &progress).await.unwrap();
        assert_eq!(updated.work_context.as_deref(), Some("Replaced seals"));
        assert_eq!(updated.observations, None);
    }
}
