//! Maintenance request service

use chrono::NaiveDate;
use indexmap::IndexMap;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        enums::Stage,
        maintenance_request::{
            CreateMaintenanceRequest, MaintenanceRequest, MaintenanceRequestDetails,
            MaintenanceRequestQuery, UpdateMaintenanceRequest,
        },
        parse_optional_date,
    },
    repository::Repository,
    services::schedule::{self, ScheduleEvaluator},
};

/// Requests grouped by stage, every stage present, in lifecycle order
pub type KanbanBoard = IndexMap<Stage, Vec<MaintenanceRequestDetails>>;

/// Group requests into kanban columns, keeping their relative order
pub fn group_by_stage(requests: Vec<MaintenanceRequestDetails>) -> KanbanBoard {
    let mut board: KanbanBoard = Stage::ALL.iter().map(|stage| (*stage, Vec::new())).collect();
    for request in requests {
        board.entry(request.request.stage).or_default().push(request);
    }
    board
}

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
    evaluator: ScheduleEvaluator,
}

impl RequestsService {
    pub fn new(repository: Repository, evaluator: ScheduleEvaluator) -> Self {
        Self { repository, evaluator }
    }

    fn flag_overdue(&self, mut rows: Vec<MaintenanceRequestDetails>, today: NaiveDate) -> Vec<MaintenanceRequestDetails> {
        for row in rows.iter_mut() {
            row.is_overdue = self
                .evaluator
                .is_request_overdue(row.request.stage, row.request.scheduled_date, today);
        }
        rows
    }

    pub async fn list(&self, query: &MaintenanceRequestQuery) -> AppResult<Vec<MaintenanceRequestDetails>> {
        let rows = self.repository.requests_list(query).await?;
        Ok(self.flag_overdue(rows, schedule::today()))
    }

    /// Request history of one piece of equipment
    pub async fn list_for_equipment(&self, equipment_id: i32) -> AppResult<Vec<MaintenanceRequestDetails>> {
        // Verify equipment exists
        self.repository.equipment_get_by_id(equipment_id).await?;
        let query = MaintenanceRequestQuery {
            equipment_id: Some(equipment_id),
            ..Default::default()
        };
        self.list(&query).await
    }

    pub async fn get(&self, id: i32) -> AppResult<MaintenanceRequestDetails> {
        let mut row = self.repository.requests_get_details(id).await?;
        row.is_overdue = self
            .evaluator
            .is_request_overdue(row.request.stage, row.request.scheduled_date, schedule::today());
        Ok(row)
    }

    /// Create a request in stage New; the technician defaults to the equipment's default technician
    pub async fn create(&self, data: &CreateMaintenanceRequest) -> AppResult<MaintenanceRequest> {
        data.validate()?;
        let scheduled_date = parse_optional_date("scheduled_date", data.scheduled_date.as_deref())?;

        let equipment = self.repository.equipment_get_by_id(data.equipment_id).await?;
        let technician_id = data.assigned_technician_id.or(equipment.default_technician_id);

        let request = self
            .repository
            .requests_create(data, technician_id, scheduled_date)
            .await?;
        tracing::info!(
            "Maintenance request {} created for equipment {} ({})",
            request.id,
            equipment.id,
            request.request_type
        );
        Ok(request)
    }

    pub async fn update(&self, id: i32, data: &UpdateMaintenanceRequest) -> AppResult<MaintenanceRequest> {
        data.validate()?;
        self.repository.requests_update(id, data).await
    }

    pub async fn kanban(&self) -> AppResult<KanbanBoard> {
        let rows = self.list(&MaintenanceRequestQuery::default()).await?;
        Ok(group_by_stage(rows))
    }

    /// Preventive requests for the calendar view
    pub async fn preventive_calendar(&self) -> AppResult<Vec<MaintenanceRequestDetails>> {
        let rows = self.repository.requests_list_preventive().await?;
        Ok(self.flag_overdue(rows, schedule::today()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{Priority, RequestType};
    use chrono::Utc;

    fn details(id: i32, stage: Stage) -> MaintenanceRequestDetails {
        MaintenanceRequestDetails {
            request: MaintenanceRequest {
                id,
                subject: format!("Request {}", id),
                equipment_id: 1,
                request_type: RequestType::Preventive,
                priority: Priority::Medium,
                stage,
                assigned_technician_id: None,
                scheduled_date: None,
                created_by: None,
                created_at: Utc::now(),
            },
            equipment_name: Some("CNC Lathe".to_string()),
            equipment_category: None,
            technician_name: None,
            team_name: None,
            performance_rating: None,
            is_overdue: false,
        }
    }

    #[test]
    fn test_board_has_every_column_in_order() {
        let board = group_by_stage(Vec::new());
        let columns: Vec<Stage> = board.keys().copied().collect();
        assert_eq!(columns, vec![Stage::New, Stage::InProgress, Stage::Repaired, Stage::Scrap]);
        assert!(board.values().all(|column| column.is_empty()));
    }

    #[test]
    fn test_board_groups_and_keeps_order() {
        let board = group_by_stage(vec![
            details(3, Stage::New),
            details(2, Stage::Repaired),
            details(1, Stage::New),
        ]);

        let new_ids: Vec<i32> = board[&Stage::New].iter().map(|r| r.request.id).collect();
        assert_eq!(new_ids, vec![3, 1]);
        assert_eq!(board[&Stage::Repaired].len(), 1);
        assert!(board[&Stage::InProgress].is_empty());
        assert!(board[&Stage::Scrap].is_empty());
    }

    #[test]
    fn test_board_serializes_stage_labels() {
        let board = group_by_stage(vec![details(1, Stage::InProgress)]);
        let text = serde_json::to_string(&board).unwrap();
        let positions: Vec<usize> = ["\"New\":", "\"In Progress\":", "\"Repaired\":", "\"Scrap\":"]
            .iter()
            .map(|key| text.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["In Progress"][0]["id"], 1);
    }
}
