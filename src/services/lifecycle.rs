//! Maintenance request lifecycle: New, In Progress, Repaired, Scrap
//!
//! Any stage may move to any other stage. Entering Scrap retires the
//! equipment in the same transaction as the stage write.

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{enums::Stage, maintenance_request::MaintenanceRequest},
    repository::MaintenanceStore,
};

/// What asked for a stage change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageTrigger {
    /// Kanban move or explicit stage update
    Manual(Stage),
    TaskStarted,
    TaskCompleted,
    Scrapped,
}

impl StageTrigger {
    pub fn target(&self) -> Stage {
        match self {
            StageTrigger::Manual(stage) => *stage,
            StageTrigger::TaskStarted => Stage::InProgress,
            StageTrigger::TaskCompleted => Stage::Repaired,
            StageTrigger::Scrapped => Stage::Scrap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// Equipment status becomes Scrap
    ScrapEquipment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTransition {
    pub from: Stage,
    pub to: Stage,
    pub effect: Option<SideEffect>,
}

impl StageTransition {
    pub fn plan(from: Stage, trigger: StageTrigger) -> Self {
        let to = trigger.target();
        let effect = (to == Stage::Scrap).then_some(SideEffect::ScrapEquipment);
        Self { from, to, effect }
    }

    pub fn is_noop(&self) -> bool {
        self.from == self.to && self.effect.is_none()
    }
}

#[derive(Clone)]
pub struct LifecycleService {
    store: Arc<dyn MaintenanceStore>,
}

impl LifecycleService {
    pub fn new(store: Arc<dyn MaintenanceStore>) -> Self {
        Self { store }
    }

    /// Move a request to `stage`, applying the Scrap cascade when needed
    pub async fn move_to_stage(&self, request_id: i32, stage: Stage) -> AppResult<MaintenanceRequest> {
        self.apply(request_id, StageTrigger::Manual(stage)).await
    }

    pub async fn scrap(&self, request_id: i32) -> AppResult<MaintenanceRequest> {
        self.apply(request_id, StageTrigger::Scrapped).await
    }

    async fn apply(&self, request_id: i32, trigger: StageTrigger) -> AppResult<MaintenanceRequest> {
        let current = self.store.get_request(request_id).await?;
        let transition = StageTransition::plan(current.stage, trigger);

        if transition.is_noop() {
            return Ok(current);
        }

        let updated = match transition.effect {
            Some(SideEffect::ScrapEquipment) => self.store.scrap_request(request_id).await?,
            None => self.store.set_stage(request_id, transition.to).await?,
        };

        tracing::info!(
            "Request {} moved {} -> {}{}",
            request_id,
            transition.from,
            transition.to,
            if transition.effect.is_some() { " (equipment scrapped)" } else { "" }
        );
        Ok(updated)
    }
}
