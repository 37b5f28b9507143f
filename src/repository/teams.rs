//! Teams and team members domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::team::{
        CreateTeam, CreateTeamMember, Team, TeamMember, TeamSummary, UpdateTeam, UpdateTeamMember,
    },
};

impl Repository {
    // ---- Teams ----

    /// List teams with member counts, ordered by name
    pub async fn teams_list(&self) -> AppResult<Vec<TeamSummary>> {
        let rows = sqlx::query_as::<_, TeamSummary>(
            r#"
            SELECT t.*, COUNT(tm.id) AS member_count
            FROM teams t
            LEFT JOIN team_members tm ON t.id = tm.team_id
            GROUP BY t.id
            ORDER BY t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn teams_get_by_id(&self, id: i32) -> AppResult<Team> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))
    }

    pub async fn teams_create(&self, data: &CreateTeam) -> AppResult<Team> {
        let row = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name, description, location, company)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.location)
        .bind(&data.company)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn teams_update(&self, id: i32, data: &UpdateTeam) -> AppResult<Team> {
        let mut sets = Vec::new();
        let mut idx = 1;

        if data.name.is_some() { sets.push(format!("name = ${}", idx)); idx += 1; }
        if data.description.is_some() { sets.push(format!("description = ${}", idx)); idx += 1; }
        if data.location.is_some() { sets.push(format!("location = ${}", idx)); idx += 1; }
        if data.company.is_some() { sets.push(format!("company = ${}", idx)); idx += 1; }

        if sets.is_empty() {
            return self.teams_get_by_id(id).await;
        }

        let query = format!("UPDATE teams SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);

        let mut builder = sqlx::query_as::<_, Team>(&query);
        if let Some(ref name) = data.name { builder = builder.bind(name); }
        if let Some(ref description) = data.description { builder = builder.bind(description); }
        if let Some(ref location) = data.location { builder = builder.bind(location); }
        if let Some(ref company) = data.company { builder = builder.bind(company); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))
    }

    // ---- Members ----

    /// List members of a team, ordered by name
    pub async fn teams_list_members(&self, team_id: i32) -> AppResult<Vec<TeamMember>> {
        let rows = sqlx::query_as::<_, TeamMember>(
            "SELECT * FROM team_members WHERE team_id = $1 ORDER BY name"
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn teams_get_member(&self, id: i32) -> AppResult<TeamMember> {
        sqlx::query_as::<_, TeamMember>("SELECT * FROM team_members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team member {} not found", id)))
    }

    pub async fn teams_add_member(&self, team_id: i32, data: &CreateTeamMember) -> AppResult<TeamMember> {
        let row = sqlx::query_as::<_, TeamMember>(
            r#"
            INSERT INTO team_members (team_id, name, email, role, is_default_technician)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.role)
        .bind(data.is_default_technician)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn teams_update_member(&self, id: i32, data: &UpdateTeamMember) -> AppResult<TeamMember> {
        let mut sets = Vec::new();
        let mut idx = 1;

        if data.name.is_some() { sets.push(format!("name = ${}", idx)); idx += 1; }
        if data.email.is_some() { sets.push(format!("email = ${}", idx)); idx += 1; }
        if data.role.is_some() { sets.push(format!("role = ${}", idx)); idx += 1; }
        if data.is_default_technician.is_some() { sets.push(format!("is_default_technician = ${}", idx)); idx += 1; }

        if sets.is_empty() {
            return self.teams_get_member(id).await;
        }

        let query = format!("UPDATE team_members SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);

        let mut builder = sqlx::query_as::<_, TeamMember>(&query);
        if let Some(ref name) = data.name { builder = builder.bind(name); }
        if let Some(ref email) = data.email { builder = builder.bind(email); }
        if let Some(ref role) = data.role { builder = builder.bind(role); }
        if let Some(flag) = data.is_default_technician { builder = builder.bind(flag); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team member {} not found", id)))
    }
}
