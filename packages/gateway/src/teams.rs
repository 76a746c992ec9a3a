// ABOUTME: Gateway operations for the teams table and team_members junction

use crate::client::{Gateway, GatewayResult};
use chrono::NaiveDate;
use crewboard_core::{clamp_progress, EntityId, Team, TeamCreateInput, TeamUpdateInput};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct TeamRow {
    pub id: EntityId,
    pub name: String,
    pub lead_id: Option<EntityId>,
    pub project_id: Option<EntityId>,
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub progress: i64,
    pub lead: Option<LeadRow>,
    #[serde(default)]
    pub team_members: Vec<TeamMemberRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LeadRow {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamMemberRow {
    pub user_id: EntityId,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Team {
            id: row.id,
            name: row.name,
            lead: row
                .lead
                .map(|l| l.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            lead_id: row.lead_id,
            deadline: row.deadline,
            progress: clamp_progress(row.progress),
            project_id: row.project_id,
            members: row.team_members.into_iter().map(|tm| tm.user_id).collect(),
        }
    }
}

impl Gateway {
    /// List all teams, newest first, with lead and member ids embedded
    pub async fn list_teams(&self) -> GatewayResult<Vec<Team>> {
        let rows: Vec<TeamRow> = self
            .select(
                "teams",
                &[
                    (
                        "select",
                        "*,lead:users!teams_lead_id_fkey(name),team_members(user_id)",
                    ),
                    ("order", "created_at.desc"),
                ],
            )
            .await?;

        debug!("Retrieved {} teams", rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a team; the backend defaults progress to 0
    pub async fn create_team(&self, data: &TeamCreateInput) -> GatewayResult<Team> {
        let row: TeamRow = self
            .insert(
                "teams",
                &json!({
                    "name": data.name,
                    "lead_id": data.lead_id,
                    "project_id": data.project_id,
                    "deadline": data.deadline,
                    "progress": 0,
                }),
            )
            .await?;
        Ok(row.into())
    }

    pub async fn update_team(&self, id: &EntityId, data: &TeamUpdateInput) -> GatewayResult<Team> {
        let mut patch = serde_json::Map::new();
        if let Some(ref name) = data.name {
            patch.insert("name".into(), json!(name));
        }
        if let Some(ref lead_id) = data.lead_id {
            patch.insert("lead_id".into(), json!(lead_id));
        }
        if let Some(ref project_id) = data.project_id {
            patch.insert("project_id".into(), json!(project_id));
        }
        if let Some(deadline) = data.deadline {
            patch.insert("deadline".into(), json!(deadline));
        }
        if let Some(progress) = data.progress {
            patch.insert("progress".into(), json!(progress));
        }

        let row: TeamRow = self.update_by_id("teams", id, &patch).await?;
        Ok(row.into())
    }

    pub async fn delete_team(&self, id: &EntityId) -> GatewayResult<()> {
        self.delete_by_id("teams", id).await
    }

    /// Add a user to a team's roster
    pub async fn add_team_member(
        &self,
        team_id: &EntityId,
        user_id: &EntityId,
    ) -> GatewayResult<()> {
        self.insert_only(
            "team_members",
            &json!({ "team_id": team_id, "user_id": user_id }),
        )
        .await
    }

    /// Remove a user from a team's roster
    pub async fn remove_team_member(
        &self,
        team_id: &EntityId,
        user_id: &EntityId,
    ) -> GatewayResult<()> {
        let team_filter = format!("eq.{}", team_id);
        let user_filter = format!("eq.{}", user_id);
        self.delete_where(
            "team_members",
            &[
                ("team_id", team_filter.as_str()),
                ("user_id", user_filter.as_str()),
            ],
        )
        .await
    }
}
