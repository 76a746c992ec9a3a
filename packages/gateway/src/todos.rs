// ABOUTME: Gateway operations for the todos table
// ABOUTME: A todo row belongs to either a project part or a member, via nullable FK columns

use crate::client::{Gateway, GatewayResult};
use crewboard_core::{EntityId, Todo};
use serde::Deserialize;
use serde_json::json;

/// Which parent a todo hangs off
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoScope {
    /// Checklist item on a project part
    Part(EntityId),
    /// Personal todo on a member
    Personal(EntityId),
}

#[derive(Debug, Deserialize)]
pub(crate) struct TodoRow {
    pub id: EntityId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            text: row.text,
            completed: row.completed,
        }
    }
}

impl Gateway {
    pub async fn create_todo(&self, scope: &TodoScope, text: &str) -> GatewayResult<Todo> {
        let body = match scope {
            TodoScope::Part(part_id) => json!({
                "project_part_id": part_id,
                "text": text,
                "completed": false,
            }),
            TodoScope::Personal(member_id) => json!({
                "member_id": member_id,
                "text": text,
                "completed": false,
            }),
        };

        let row: TodoRow = self.insert("todos", &body).await?;
        Ok(row.into())
    }

    pub async fn update_todo(
        &self,
        id: &EntityId,
        text: Option<&str>,
        completed: Option<bool>,
    ) -> GatewayResult<Todo> {
        let mut patch = serde_json::Map::new();
        if let Some(text) = text {
            patch.insert("text".into(), json!(text));
        }
        if let Some(completed) = completed {
            patch.insert("completed".into(), json!(completed));
        }

        let row: TodoRow = self.update_by_id("todos", id, &patch).await?;
        Ok(row.into())
    }

    pub async fn delete_todo(&self, id: &EntityId) -> GatewayResult<()> {
        self.delete_by_id("todos", id).await
    }
}
