// ABOUTME: Gateway operations for the users table
// ABOUTME: Users surface in the application as Members with assigned-task ids and personal todos

use crate::client::{Gateway, GatewayResult};
use crate::todos::TodoRow;
use crewboard_core::{EntityId, Member, MemberCreateInput, MemberUpdateInput, Role};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct UserRow {
    pub id: EntityId,
    pub name: String,
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
    pub team_id: Option<EntityId>,
    #[serde(default)]
    pub tasks: Vec<TaskIdRow>,
    #[serde(default)]
    pub todos: Vec<TodoRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskIdRow {
    pub id: EntityId,
}

impl From<UserRow> for Member {
    fn from(row: UserRow) -> Self {
        Member {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            team_id: row.team_id,
            tasks: row.tasks.into_iter().map(|t| t.id).collect(),
            personal_todos: row.todos.into_iter().map(Into::into).collect(),
        }
    }
}

impl Gateway {
    /// List all members, newest first, with assigned-task ids and personal todos embedded
    pub async fn list_users(&self) -> GatewayResult<Vec<Member>> {
        let rows: Vec<UserRow> = self
            .select(
                "users",
                &[
                    (
                        "select",
                        "*,tasks:tasks!tasks_assigned_to_fkey(id),todos(*)",
                    ),
                    ("order", "created_at.desc"),
                ],
            )
            .await?;

        debug!("Retrieved {} users", rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create_user(&self, data: &MemberCreateInput) -> GatewayResult<Member> {
        let row: UserRow = self
            .insert(
                "users",
                &json!({
                    "name": data.name,
                    "email": data.email,
                    "role": data.role,
                    "team_id": data.team_id,
                }),
            )
            .await?;
        Ok(row.into())
    }

    pub async fn update_user(
        &self,
        id: &EntityId,
        data: &MemberUpdateInput,
    ) -> GatewayResult<Member> {
        let mut patch = serde_json::Map::new();
        if let Some(ref name) = data.name {
            patch.insert("name".into(), json!(name));
        }
        if let Some(ref email) = data.email {
            patch.insert("email".into(), json!(email));
        }
        if let Some(role) = data.role {
            patch.insert("role".into(), json!(role));
        }
        if let Some(ref team_id) = data.team_id {
            patch.insert("team_id".into(), json!(team_id));
        }

        let row: UserRow = self.update_by_id("users", id, &patch).await?;
        Ok(row.into())
    }

    pub async fn delete_user(&self, id: &EntityId) -> GatewayResult<()> {
        self.delete_by_id("users", id).await
    }
}
