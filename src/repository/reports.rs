//! Aggregation queries behind reports and dashboards

use chrono::NaiveDate;

use super::Repository;
use crate::{
    error::AppResult,
    models::report::{
        DowntimeRow, EquipmentHistoryRow, MaintenanceCostRow, RecentActivity,
        TechnicianPerformanceRow,
    },
};

impl Repository {
    /// Request counts, completions, mean duration and rating per equipment
    pub async fn reports_equipment_history(&self) -> AppResult<Vec<EquipmentHistoryRow>> {
        let rows = sqlx::query_as::<_, EquipmentHistoryRow>(
            r#"
            SELECT e.id AS equipment_id, e.name AS equipment_name, e.category, e.department,
                   COUNT(mr.id) AS total_requests,
                   COUNT(*) FILTER (WHERE mr.request_type = 'Preventive') AS preventive_count,
                   COUNT(*) FILTER (WHERE mr.request_type = 'Corrective') AS corrective_count,
                   COUNT(*) FILTER (WHERE mr.stage = 'Repaired') AS completed_count,
                   AVG(ta.total_time_minutes)::float8 AS avg_repair_time,
                   AVG(ta.performance_rating)::float8 AS avg_rating
            FROM equipment e
            LEFT JOIN maintenance_requests mr ON e.id = mr.equipment_id
            LEFT JOIN task_activities ta ON mr.id = ta.request_id
            GROUP BY e.id, e.name
            ORDER BY total_requests DESC, e.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Costs of legacy logs, matched to equipment through the asset name
    pub async fn reports_maintenance_costs(&self) -> AppResult<Vec<MaintenanceCostRow>> {
        let rows = sqlx::query_as::<_, MaintenanceCostRow>(
            r#"
            SELECT e.id AS equipment_id, e.name AS equipment_name, e.category,
                   COUNT(ml.id) AS maintenance_count,
                   SUM(ml.cost) AS total_cost,
                   ROUND(AVG(ml.cost), 2) AS avg_cost,
                   MAX(ml.cost) AS max_cost
            FROM equipment e
            JOIN assets a ON e.name = a.name AND a.deleted = FALSE
            JOIN maintenance_logs ml ON a.id = ml.asset_id
            WHERE ml.cost > 0
            GROUP BY e.id, e.name
            ORDER BY total_cost DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Workload and quality per team member; members without assignments are left out
    pub async fn reports_technician_performance(
        &self,
        today: NaiveDate,
    ) -> AppResult<Vec<TechnicianPerformanceRow>> {
        let rows = sqlx::query_as::<_, TechnicianPerformanceRow>(
            r#"
            SELECT tm.id AS technician_id, tm.name AS technician_name, t.name AS team_name,
                   COUNT(mr.id) AS total_assignments,
                   COUNT(*) FILTER (WHERE mr.stage = 'Repaired') AS completed_tasks,
                   AVG(ta.total_time_minutes)::float8 AS avg_completion_time,
                   AVG(ta.performance_rating)::float8 AS avg_rating,
                   COUNT(*) FILTER (
                       WHERE mr.scheduled_date < $1 AND mr.stage NOT IN ('Repaired', 'Scrap')
                   ) AS overdue_tasks
            FROM team_members tm
            LEFT JOIN teams t ON tm.team_id = t.id
            LEFT JOIN maintenance_requests mr ON tm.id = mr.assigned_technician_id
            LEFT JOIN task_activities ta ON mr.id = ta.request_id
            GROUP BY tm.id, tm.name, t.name
            HAVING COUNT(mr.id) > 0
            ORDER BY avg_rating DESC NULLS LAST, completed_tasks DESC
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Corrective work per equipment; equipment with no breakdowns is left out
    pub async fn reports_downtime(&self) -> AppResult<Vec<DowntimeRow>> {
        let rows = sqlx::query_as::<_, DowntimeRow>(
            r#"
            SELECT e.id AS equipment_id, e.name AS equipment_name, e.category, e.department,
                   COUNT(*) FILTER (WHERE mr.request_type = 'Corrective') AS breakdown_count,
                   COALESCE(SUM(ta.total_time_minutes) FILTER (WHERE mr.request_type = 'Corrective'), 0)::bigint
                       AS total_downtime_minutes,
                   (AVG(ta.total_time_minutes) FILTER (WHERE mr.request_type = 'Corrective'))::float8
                       AS avg_downtime_minutes
            FROM equipment e
            LEFT JOIN maintenance_requests mr ON e.id = mr.equipment_id
            LEFT JOIN task_activities ta ON mr.id = ta.request_id
            GROUP BY e.id, e.name
            HAVING COUNT(*) FILTER (WHERE mr.request_type = 'Corrective') > 0
            ORDER BY total_downtime_minutes DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// (preventive, corrective) request counts
    pub async fn reports_request_type_counts(&self) -> AppResult<(i64, i64)> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FILTER (WHERE request_type = 'Preventive'),
                   COUNT(*) FILTER (WHERE request_type = 'Corrective')
            FROM maintenance_requests
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }

    pub async fn reports_count_equipment(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// (open, overdue, completed) request counts
    pub async fn reports_request_stage_counts(&self, today: NaiveDate) -> AppResult<(i64, i64, i64)> {
        let counts: (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FILTER (WHERE stage NOT IN ('Repaired', 'Scrap')),
                   COUNT(*) FILTER (WHERE scheduled_date < $1 AND stage NOT IN ('Repaired', 'Scrap')),
                   COUNT(*) FILTER (WHERE stage = 'Repaired')
            FROM maintenance_requests
            "#,
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }

    pub async fn reports_recent_activity(&self, limit: i64) -> AppResult<Vec<RecentActivity>> {
        let rows = sqlx::query_as::<_, RecentActivity>(
            r#"
            SELECT mr.id AS request_id, mr.subject, mr.stage, mr.created_at,
                   e.name AS equipment_name, tm.name AS technician_name
            FROM maintenance_requests mr
            LEFT JOIN equipment e ON mr.equipment_id = e.id
            LEFT JOIN team_members tm ON mr.assigned_technician_id = tm.id
            ORDER BY mr.created_at DESC, mr.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
