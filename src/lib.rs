//! GearGuard maintenance tracker
//!
//! REST JSON API for tracking equipment, maintenance teams, maintenance
//! requests and their execution, plus the legacy asset/log registry.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
