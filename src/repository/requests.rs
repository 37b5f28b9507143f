//! Maintenance request domain methods on Repository

use chrono::NaiveDate;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{EquipmentStatus, Stage},
        maintenance_request::{
            CreateMaintenanceRequest, MaintenanceRequest, MaintenanceRequestDetails,
            MaintenanceRequestQuery, UpdateMaintenanceRequest,
        },
        parse_optional_date,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT mr.*,
           e.name AS equipment_name,
           e.category AS equipment_category,
           tm.name AS technician_name,
           t.name AS team_name,
           ta.performance_rating
    FROM maintenance_requests mr
    LEFT JOIN equipment e ON mr.equipment_id = e.id
    LEFT JOIN team_members tm ON mr.assigned_technician_id = tm.id
    LEFT JOIN teams t ON e.maintenance_team_id = t.id
    LEFT JOIN task_activities ta ON mr.id = ta.request_id
"#;

impl Repository {
    /// List requests newest first, with optional filters
    pub async fn requests_list(
        &self,
        query: &MaintenanceRequestQuery,
    ) -> AppResult<Vec<MaintenanceRequestDetails>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.stage.is_some() {
            conditions.push(format!("mr.stage = ${}", idx));
            idx += 1;
        }
        if query.request_type.is_some() {
            conditions.push(format!("mr.request_type = ${}", idx));
            idx += 1;
        }
        if query.equipment_id.is_some() {
            conditions.push(format!("mr.equipment_id = ${}", idx));
            idx += 1;
        }
        if query.technician_id.is_some() {
            conditions.push(format!("mr.assigned_technician_id = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let q = format!(
            "{} {} ORDER BY mr.created_at DESC, mr.id DESC",
            DETAILS_SELECT, where_clause
        );

        let mut builder = sqlx::query_as::<_, MaintenanceRequestDetails>(&q);
        if let Some(stage) = query.stage { builder = builder.bind(stage); }
        if let Some(request_type) = query.request_type { builder = builder.bind(request_type); }
        if let Some(equipment_id) = query.equipment_id { builder = builder.bind(equipment_id); }
        if let Some(technician_id) = query.technician_id { builder = builder.bind(technician_id); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Preventive requests ordered by scheduled date (calendar view)
    pub async fn requests_list_preventive(&self) -> AppResult<Vec<MaintenanceRequestDetails>> {
        let q = format!(
            "{} WHERE mr.request_type = 'Preventive' ORDER BY mr.scheduled_date NULLS LAST, mr.id",
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, MaintenanceRequestDetails>(&q)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get a request with its joined names
    pub async fn requests_get_details(&self, id: i32) -> AppResult<MaintenanceRequestDetails> {
        let q = format!("{} WHERE mr.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, MaintenanceRequestDetails>(&q)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))
    }

    pub async fn requests_get_by_id(&self, id: i32) -> AppResult<MaintenanceRequest> {
        sqlx::query_as::<_, MaintenanceRequest>("SELECT * FROM maintenance_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))
    }

    /// Insert a request in stage New
    pub async fn requests_create(
        &self,
        data: &CreateMaintenanceRequest,
        assigned_technician_id: Option<i32>,
        scheduled_date: Option<NaiveDate>,
    ) -> AppResult<MaintenanceRequest> {
        let row = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            INSERT INTO maintenance_requests (
                subject, equipment_id, request_type, priority, stage,
                assigned_technician_id, scheduled_date, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&data.subject)
        .bind(data.equipment_id)
        .bind(data.request_type)
        .bind(data.priority.unwrap_or_default())
        .bind(Stage::New)
        .bind(assigned_technician_id)
        .bind(scheduled_date)
        .bind(&data.created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update only the supplied fields (never the stage)
    pub async fn requests_update(
        &self,
        id: i32,
        data: &UpdateMaintenanceRequest,
    ) -> AppResult<MaintenanceRequest> {
        let scheduled_date = data
            .scheduled_date
            .as_ref()
            .map(|value| parse_optional_date("scheduled_date", value.as_deref()))
            .transpose()?;

        let mut sets = Vec::new();
        let mut idx = 1;

        if data.subject.is_some() { sets.push(format!("subject = ${}", idx)); idx += 1; }
        if data.request_type.is_some() { sets.push(format!("request_type = ${}", idx)); idx += 1; }
        if data.priority.is_some() { sets.push(format!("priority = ${}", idx)); idx += 1; }
        if data.assigned_technician_id.is_some() { sets.push(format!("assigned_technician_id = ${}", idx)); idx += 1; }
        if scheduled_date.is_some() { sets.push(format!("scheduled_date = ${}", idx)); idx += 1; }

        if sets.is_empty() {
            return self.requests_get_by_id(id).await;
        }

        let query = format!(
            "UPDATE maintenance_requests SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, MaintenanceRequest>(&query);
        if let Some(ref subject) = data.subject { builder = builder.bind(subject); }
        if let Some(request_type) = data.request_type { builder = builder.bind(request_type); }
        if let Some(priority) = data.priority { builder = builder.bind(priority); }
        if let Some(technician_id) = data.assigned_technician_id { builder = builder.bind(technician_id); }
        if let Some(date) = scheduled_date { builder = builder.bind(date); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))
    }

    /// Overwrite the stage, nothing else
    pub async fn requests_set_stage(&self, id: i32, stage: Stage) -> AppResult<MaintenanceRequest> {
        sqlx::query_as::<_, MaintenanceRequest>(
            "UPDATE maintenance_requests SET stage = $1 WHERE id = $2 RETURNING *"
        )
        .bind(stage)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))
    }

    /// Move a request to Scrap and retire its equipment in one transaction
    pub async fn requests_scrap(&self, id: i32) -> AppResult<MaintenanceRequest> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, MaintenanceRequest>(
            "UPDATE maintenance_requests SET stage = $1 WHERE id = $2 RETURNING *"
        )
        .bind(Stage::Scrap)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))?;

        sqlx::query("UPDATE equipment SET status = $1 WHERE id = $2")
            .bind(EquipmentStatus::Scrap)
            .bind(request.equipment_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(request)
    }
}
