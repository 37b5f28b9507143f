//! Equipment service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        enums::EquipmentStatus,
        equipment::{CreateEquipment, Equipment, EquipmentQuery, EquipmentSummary, UpdateEquipment},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentSummary>> {
        self.repository.equipment_list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        let equipment = self.repository.equipment_create(data).await?;
        tracing::info!("Equipment created: id={} name={}", equipment.id, equipment.name);
        Ok(equipment)
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        self.repository.equipment_update(id, data).await
    }

    /// Manual status change; scrapping through a request goes via the lifecycle service
    pub async fn set_status(&self, id: i32, status: EquipmentStatus) -> AppResult<Equipment> {
        let equipment = self.repository.equipment_set_status(id, status).await?;
        tracing::info!("Equipment {} status set to {}", id, status);
        Ok(equipment)
    }
}
