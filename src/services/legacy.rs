//! Legacy assets, maintenance logs and their schedule/dashboard views

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    config::ScheduleConfig,
    error::AppResult,
    models::{
        asset::{
            Asset, AssetQuery, AssetSchedule, CreateAsset, CreateMaintenanceLog, MaintenanceLog,
            MaintenanceLogDetails, MaintenanceLogQuery, UpdateAsset,
        },
        enums::ScheduleStatus,
        report::LegacyDashboard,
    },
    repository::Repository,
    services::schedule::{self, ScheduleEvaluator},
};

/// (due, overdue) counts over a set of schedule lines
pub fn count_due_and_overdue(schedules: &[AssetSchedule]) -> (i64, i64) {
    schedules.iter().fold((0, 0), |(due, overdue), line| match line.status {
        Some(ScheduleStatus::Due) => (due + 1, overdue),
        Some(ScheduleStatus::Overdue) => (due, overdue + 1),
        _ => (due, overdue),
    })
}

#[derive(Clone)]
pub struct LegacyService {
    repository: Repository,
    evaluator: ScheduleEvaluator,
    recent_logs_limit: i64,
}

impl LegacyService {
    pub fn new(repository: Repository, config: &ScheduleConfig) -> Self {
        Self {
            repository,
            evaluator: ScheduleEvaluator::new(config.due_window_days),
            recent_logs_limit: config.recent_logs_limit,
        }
    }

    pub async fn list_assets(&self, query: &AssetQuery) -> AppResult<Vec<Asset>> {
        self.repository.assets_list(query).await
    }

    pub async fn get_asset(&self, id: i32) -> AppResult<Asset> {
        self.repository.assets_get_by_id(id).await
    }

    pub async fn create_asset(&self, data: &CreateAsset) -> AppResult<Asset> {
        data.validate()?;
        self.repository.assets_create(data).await
    }

    pub async fn update_asset(&self, id: i32, data: &UpdateAsset) -> AppResult<Asset> {
        data.validate()?;
        self.repository.assets_update(id, data).await
    }

    /// Soft delete; the asset's logs are kept
    pub async fn delete_asset(&self, id: i32) -> AppResult<()> {
        self.repository.assets_soft_delete(id).await?;
        tracing::info!("Asset {} deleted", id);
        Ok(())
    }

    pub async fn list_logs(&self, query: &MaintenanceLogQuery) -> AppResult<Vec<MaintenanceLogDetails>> {
        self.repository.logs_list(query).await
    }

    pub async fn create_log(&self, data: &CreateMaintenanceLog) -> AppResult<MaintenanceLog> {
        let log = self.repository.logs_create(data).await?;
        tracing::info!("Maintenance log {} recorded for asset {}", log.id, log.asset_id);
        Ok(log)
    }

    /// Next-service line for every live asset
    pub async fn schedule(&self) -> AppResult<Vec<AssetSchedule>> {
        self.schedule_on(schedule::today()).await
    }

    async fn schedule_on(&self, today: NaiveDate) -> AppResult<Vec<AssetSchedule>> {
        let assets = self.repository.assets_list(&AssetQuery::default()).await?;
        Ok(assets
            .iter()
            .map(|asset| self.evaluator.asset_schedule(asset, today))
            .collect())
    }

    pub async fn dashboard(&self) -> AppResult<LegacyDashboard> {
        let schedules = self.schedule_on(schedule::today()).await?;
        let (maintenance_due, overdue_maintenance) = count_due_and_overdue(&schedules);

        Ok(LegacyDashboard {
            total_assets: schedules.len() as i64,
            maintenance_due,
            overdue_maintenance,
            completed_maintenance: self.repository.logs_count().await?,
            recent: self.repository.logs_recent(self.recent_logs_limit).await?,
        })
    }
}
