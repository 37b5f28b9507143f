//! Reports and dashboard summary

use crate::{
    config::ScheduleConfig,
    error::AppResult,
    models::{
        report::{
            DashboardSummary, DowntimeRow, EquipmentHistoryRow, MaintenanceCostRow,
            MaintenanceRatio, TechnicianPerformanceRow,
        },
        task_activity::CompletedTask,
    },
    repository::Repository,
    services::schedule,
};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl MaintenanceRatio {
    /// Percentages rounded to two decimals; all zero when there are no requests
    pub fn from_counts(preventive_count: i64, corrective_count: i64) -> Self {
        let total_requests = preventive_count + corrective_count;
        let percentage = |count: i64| {
            if total_requests == 0 {
                0.0
            } else {
                round2(count as f64 * 100.0 / total_requests as f64)
            }
        };

        Self {
            preventive_count,
            corrective_count,
            total_requests,
            preventive_percentage: percentage(preventive_count),
            corrective_percentage: percentage(corrective_count),
        }
    }
}

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
    recent_requests_limit: i64,
}

impl ReportsService {
    pub fn new(repository: Repository, config: &ScheduleConfig) -> Self {
        Self {
            repository,
            recent_requests_limit: config.recent_requests_limit,
        }
    }

    pub async fn equipment_history(&self) -> AppResult<Vec<EquipmentHistoryRow>> {
        self.repository.reports_equipment_history().await
    }

    pub async fn maintenance_costs(&self) -> AppResult<Vec<MaintenanceCostRow>> {
        self.repository.reports_maintenance_costs().await
    }

    pub async fn technician_performance(&self) -> AppResult<Vec<TechnicianPerformanceRow>> {
        self.repository
            .reports_technician_performance(schedule::today())
            .await
    }

    pub async fn downtime(&self) -> AppResult<Vec<DowntimeRow>> {
        self.repository.reports_downtime().await
    }

    pub async fn maintenance_ratio(&self) -> AppResult<MaintenanceRatio> {
        let (preventive, corrective) = self.repository.reports_request_type_counts().await?;
        Ok(MaintenanceRatio::from_counts(preventive, corrective))
    }

    pub async fn completed_tasks(&self) -> AppResult<Vec<CompletedTask>> {
        self.repository.tasks_list_completed().await
    }

    pub async fn dashboard(&self) -> AppResult<DashboardSummary> {
        let total_equipment = self.repository.reports_count_equipment().await?;
        let (open_requests, overdue_tasks, completed_tasks) = self
            .repository
            .reports_request_stage_counts(schedule::today())
            .await?;
        let recent_activities = self
            .repository
            .reports_recent_activity(self.recent_requests_limit)
            .await?;

        Ok(DashboardSummary {
            total_equipment,
            open_requests,
            overdue_tasks,
            completed_tasks,
            recent_activities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_percentages() {
        let ratio = MaintenanceRatio::from_counts(1, 2);
        assert_eq!(ratio.total_requests, 3);
        assert_eq!(ratio.preventive_percentage, 33.33);
        assert_eq!(ratio.corrective_percentage, 66.67);
    }

    #[test]
    fn test_ratio_sums_to_hundred() {
        let ratio = MaintenanceRatio::from_counts(7, 13);
        assert_eq!(ratio.preventive_percentage, 35.0);
        assert_eq!(ratio.corrective_percentage, 65.0);
        assert!((ratio.preventive_percentage + ratio.corrective_percentage - 100.0).abs() < 0.011);
    }

    #[test]
    fn test_ratio_without_requests_is_zero() {
        let ratio = MaintenanceRatio::from_counts(0, 0);
        assert_eq!(ratio.total_requests, 0);
        assert_eq!(ratio.preventive_percentage, 0.0);
        assert_eq!(ratio.corrective_percentage, 0.0);
    }

    #[test]
    fn test_ratio_single_kind() {
        let ratio = MaintenanceRatio::from_counts(4, 0);
        assert_eq!(ratio.preventive_percentage, 100.0);
        assert_eq!(ratio.corrective_percentage, 0.0);
    }
}
