//! Maintenance teams and their members

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Team with its member count
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TeamSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub team: Team,
    pub member_count: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeam {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTeam {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
}

/// A technician (or lead, supervisor...) belonging to one team
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamMember {
    pub id: i32,
    pub team_id: i32,
    pub name: String,
    pub email: Option<String>,
    /// Technician, Senior Technician, Team Lead, Supervisor...
    pub role: Option<String>,
    pub is_default_technician: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeamMember {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: Option<String>,
    #[serde(default)]
    pub is_default_technician: bool,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTeamMember {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_default_technician: Option<bool>,
}
