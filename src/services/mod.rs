//! Business logic services

pub mod equipment;
pub mod legacy;
pub mod lifecycle;
pub mod reports;
pub mod requests;
pub mod schedule;
pub mod task_activities;
pub mod teams;

use std::sync::Arc;

use crate::{config::ScheduleConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub equipment: equipment::EquipmentService,
    pub teams: teams::TeamsService,
    pub requests: requests::RequestsService,
    pub lifecycle: lifecycle::LifecycleService,
    pub tasks: task_activities::TaskActivityService,
    pub legacy: legacy::LegacyService,
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, schedule_config: &ScheduleConfig) -> Self {
        let evaluator = schedule::ScheduleEvaluator::new(schedule_config.due_window_days);
        let store = Arc::new(repository.clone());

        Self {
            equipment: equipment::EquipmentService::new(repository.clone()),
            teams: teams::TeamsService::new(repository.clone()),
            requests: requests::RequestsService::new(repository.clone(), evaluator),
            lifecycle: lifecycle::LifecycleService::new(store.clone()),
            tasks: task_activities::TaskActivityService::new(store),
            legacy: legacy::LegacyService::new(repository.clone(), schedule_config),
            reports: reports::ReportsService::new(repository.clone(), schedule_config),
            repository,
        }
    }
}
