//! API handlers for GearGuard REST endpoints

pub mod assets;
pub mod equipment;
pub mod health;
pub mod openapi;
pub mod reports;
pub mod requests;
pub mod task_activities;
pub mod teams;
