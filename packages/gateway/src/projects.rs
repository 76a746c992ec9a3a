// ABOUTME: Gateway operations for the projects table
// ABOUTME: List embeds manager, team ids, parts, and part todos in a single query

use crate::client::{Gateway, GatewayResult};
use crate::parts::PartRow;
use chrono::NaiveDate;
use crewboard_core::{
    clamp_progress, ActivityEntry, EntityId, Project, ProjectCreateInput, ProjectStatus,
    ProjectUpdateInput,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectRow {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub manager_id: Option<EntityId>,
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub status: ProjectStatus,
    pub manager: Option<ManagerRow>,
    #[serde(default)]
    pub project_teams: Vec<ProjectTeamRow>,
    #[serde(default)]
    pub project_parts: Vec<PartRow>,
    #[serde(default)]
    pub activity_log: Vec<ActivityLogRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ManagerRow {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectTeamRow {
    pub team_id: EntityId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActivityLogRow {
    pub date: NaiveDate,
    pub message: String,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            description: row.description,
            manager: row
                .manager
                .map(|m| m.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            manager_id: row.manager_id,
            deadline: row.deadline,
            progress: clamp_progress(row.progress),
            status: row.status,
            teams: row.project_teams.into_iter().map(|pt| pt.team_id).collect(),
            parts: row.project_parts.into_iter().map(Into::into).collect(),
            activity_log: row
                .activity_log
                .into_iter()
                .map(|e| ActivityEntry {
                    date: e.date,
                    message: e.message,
                })
                .collect(),
        }
    }
}

impl Gateway {
    /// List all projects, newest first, with related rows embedded
    pub async fn list_projects(&self) -> GatewayResult<Vec<Project>> {
        let rows: Vec<ProjectRow> = self
            .select(
                "projects",
                &[
                    (
                        "select",
                        "*,manager:users!projects_manager_id_fkey(name),\
                         project_teams(team_id),project_parts(*,todos(*))",
                    ),
                    ("order", "created_at.desc"),
                ],
            )
            .await?;

        debug!("Retrieved {} projects", rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a project; the backend defaults progress to 0 and status to active
    pub async fn create_project(&self, data: &ProjectCreateInput) -> GatewayResult<Project> {
        let row: ProjectRow = self
            .insert(
                "projects",
                &json!({
                    "name": data.name,
                    "description": data.description,
                    "manager_id": data.manager_id,
                    "deadline": data.deadline,
                    "progress": 0,
                    "status": ProjectStatus::Active,
                }),
            )
            .await?;
        Ok(row.into())
    }

    pub async fn update_project(
        &self,
        id: &EntityId,
        data: &ProjectUpdateInput,
    ) -> GatewayResult<Project> {
        let mut patch = serde_json::Map::new();
        if let Some(ref name) = data.name {
            patch.insert("name".into(), json!(name));
        }
        if let Some(ref description) = data.description {
            patch.insert("description".into(), json!(description));
        }
        if let Some(ref manager_id) = data.manager_id {
            patch.insert("manager_id".into(), json!(manager_id));
        }
        if let Some(deadline) = data.deadline {
            patch.insert("deadline".into(), json!(deadline));
        }
        if let Some(progress) = data.progress {
            patch.insert("progress".into(), json!(progress));
        }
        if let Some(status) = data.status {
            patch.insert("status".into(), json!(status));
        }

        let row: ProjectRow = self.update_by_id("projects", id, &patch).await?;
        Ok(row.into())
    }

    pub async fn delete_project(&self, id: &EntityId) -> GatewayResult<()> {
        self.delete_by_id("projects", id).await
    }

    /// Attach a team to a project via the junction table
    pub async fn add_project_team(
        &self,
        project_id: &EntityId,
        team_id: &EntityId,
    ) -> GatewayResult<()> {
        self.insert_only(
            "project_teams",
            &json!({ "project_id": project_id, "team_id": team_id }),
        )
        .await
    }
}
