// ABOUTME: Gateway operations for the project_parts table

use crate::client::{Gateway, GatewayResult};
use crate::todos::TodoRow;
use crewboard_core::{clamp_progress, EntityId, PartCreateInput, PartUpdateInput, ProjectPart};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct PartRow {
    pub id: EntityId,
    pub project_id: EntityId,
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_weight")]
    pub weight: u8,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub todos: Vec<TodoRow>,
}

fn default_weight() -> u8 {
    1
}

impl From<PartRow> for ProjectPart {
    fn from(row: PartRow) -> Self {
        ProjectPart {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            description: row.description,
            weight: row.weight,
            progress: clamp_progress(row.progress),
            todos: row.todos.into_iter().map(Into::into).collect(),
        }
    }
}

impl Gateway {
    pub async fn create_part(
        &self,
        project_id: &EntityId,
        data: &PartCreateInput,
    ) -> GatewayResult<ProjectPart> {
        let row: PartRow = self
            .insert(
                "project_parts",
                &json!({
                    "project_id": project_id,
                    "name": data.name,
                    "description": data.description,
                    "weight": data.weight,
                    "progress": data.progress.unwrap_or(0),
                }),
            )
            .await?;
        Ok(row.into())
    }

    pub async fn update_part(
        &self,
        id: &EntityId,
        data: &PartUpdateInput,
    ) -> GatewayResult<ProjectPart> {
        let mut patch = serde_json::Map::new();
        if let Some(ref name) = data.name {
            patch.insert("name".into(), json!(name));
        }
        if let Some(ref description) = data.description {
            patch.insert("description".into(), json!(description));
        }
        if let Some(weight) = data.weight {
            patch.insert("weight".into(), json!(weight));
        }
        if let Some(progress) = data.progress {
            patch.insert("progress".into(), json!(progress));
        }

        let row: PartRow = self.update_by_id("project_parts", id, &patch).await?;
        Ok(row.into())
    }

    pub async fn delete_part(&self, id: &EntityId) -> GatewayResult<()> {
        self.delete_by_id("project_parts", id).await
    }
}
