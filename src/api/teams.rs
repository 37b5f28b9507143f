//! Maintenance team API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::team::{CreateTeam, CreateTeamMember, Team, TeamMember, TeamSummary, UpdateTeam, UpdateTeamMember},
};

/// List teams with member counts
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    responses(
        (status = 200, description = "Team list", body = Vec<TeamSummary>)
    )
)]
pub async fn list_teams(State(state): State<crate::AppState>) -> AppResult<Json<Vec<TeamSummary>>> {
    let teams = state.services.teams.list().await?;
    Ok(Json(teams))
}

/// Get team by ID
#[utoipa::path(
    get,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team details", body = Team),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_team(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Team>> {
    let team = state.services.teams.get_by_id(id).await?;
    Ok(Json(team))
}

/// Create a team
#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    request_body = CreateTeam,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_team(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateTeam>,
) -> AppResult<(StatusCode, Json<Team>)> {
    let team = state.services.teams.create(&data).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// Update a team (partial)
#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = i32, Path, description = "Team ID")),
    request_body = UpdateTeam,
    responses(
        (status = 200, description = "Team updated", body = Team),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_team(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateTeam>,
) -> AppResult<Json<Team>> {
    let team = state.services.teams.update(id, &data).await?;
    Ok(Json(team))
}

/// List members of a team
#[utoipa::path(
    get,
    path = "/teams/{id}/members",
    tag = "teams",
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team members", body = Vec<TeamMember>),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_team_members(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<TeamMember>>> {
    let members = state.services.teams.list_members(id).await?;
    Ok(Json(members))
}

/// Add a member to a team
#[utoipa::path(
    post,
    path = "/teams/{id}/members",
    tag = "teams",
    params(("id" = i32, Path, description = "Team ID")),
    request_body = CreateTeamMember,
    responses(
        (status = 201, description = "Member added", body = TeamMember),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_team_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<CreateTeamMember>,
) -> AppResult<(StatusCode, Json<TeamMember>)> {
    let member = state.services.teams.add_member(id, &data).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// Get a team member
#[utoipa::path(
    get,
    path = "/team-members/{id}",
    tag = "teams",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Team member", body = TeamMember),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_team_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<TeamMember>> {
    let member = state.services.teams.get_member(id).await?;
    Ok(Json(member))
}

/// Update a team member (partial)
#[utoipa::path(
    put,
    path = "/team-members/{id}",
    tag = "teams",
    params(("id" = i32, Path, description = "Member ID")),
    request_body = UpdateTeamMember,
    responses(
        (status = 200, description = "Member updated", body = TeamMember),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_team_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateTeamMember>,
) -> AppResult<Json<TeamMember>> {
    let member = state.services.teams.update_member(id, &data).await?;
    Ok(Json(member))
}
