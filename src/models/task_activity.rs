//! Task activity: the single execution record of a maintenance request

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::{RequestType, Stage};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TaskActivity {
    pub id: i32,
    pub request_id: i32,
    pub actual_start_time: Option<DateTime<Utc>>,
    pub actual_finish_time: Option<DateTime<Utc>>,
    /// Written at completion from start and finish times
    pub total_time_minutes: Option<i32>,
    pub work_context: Option<String>,
    pub observations: Option<String>,
    pub parts_used: Option<String>,
    pub performance_rating: Option<i16>,
    pub feedback: Option<String>,
}

/// In-progress notes
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct TaskProgress {
    pub work_context: Option<String>,
    pub observations: Option<String>,
    pub parts_used: Option<String>,
}

/// Completion payload
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CompleteTask {
    pub performance_rating: Option<i16>,
    pub feedback: Option<String>,
}

/// Values written when a task is completed
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCompletion {
    /// Stage the request lands in
    pub stage: Stage,
    pub finished_at: DateTime<Utc>,
    pub total_time_minutes: i32,
    pub performance_rating: Option<i16>,
    pub feedback: Option<String>,
}

/// Completed task joined with its request for reporting
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CompletedTask {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub activity: TaskActivity,
    pub subject: String,
    pub request_type: RequestType,
    pub equipment_name: String,
    pub technician_name: Option<String>,
}
