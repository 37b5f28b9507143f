//! Maintenance teams and their members

use validator::Validate;

use crate::{
    error::AppResult,
    models::team::{CreateTeam, CreateTeamMember, Team, TeamMember, TeamSummary, UpdateTeam, UpdateTeamMember},
    repository::Repository,
};

#[derive(Clone)]
pub struct TeamsService {
    repository: Repository,
}

impl TeamsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<TeamSummary>> {
        self.repository.teams_list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Team> {
        self.repository.teams_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateTeam) -> AppResult<Team> {
        data.validate()?;
        self.repository.teams_create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateTeam) -> AppResult<Team> {
        data.validate()?;
        self.repository.teams_update(id, data).await
    }

    pub async fn list_members(&self, team_id: i32) -> AppResult<Vec<TeamMember>> {
        // Verify team exists
        self.repository.teams_get_by_id(team_id).await?;
        self.repository.teams_list_members(team_id).await
    }

    pub async fn add_member(&self, team_id: i32, data: &CreateTeamMember) -> AppResult<TeamMember> {
        data.validate()?;
        self.repository.teams_get_by_id(team_id).await?;
        self.repository.teams_add_member(team_id, data).await
    }

    pub async fn get_member(&self, id: i32) -> AppResult<TeamMember> {
        self.repository.teams_get_member(id).await
    }

    pub async fn update_member(&self, id: i32, data: &UpdateTeamMember) -> AppResult<TeamMember> {
        data.validate()?;
        self.repository.teams_update_member(id, data).await
    }
}
