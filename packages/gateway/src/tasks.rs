// ABOUTME: Gateway operations for the tasks, task_history, and task_comments tables
// ABOUTME: History inserts are a secondary write; callers treat them as best-effort

use crate::client::{Gateway, GatewayResult};
use chrono::{DateTime, NaiveDate, Utc};
use crewboard_core::{
    clamp_progress, EntityId, Task, TaskCategory, TaskCreateInput, TaskPriority, TaskStatus,
    TaskUpdateInput,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct TaskRow {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub project_id: EntityId,
    pub project_part_id: Option<EntityId>,
    pub assigned_to: EntityId,
    pub assigned_by: EntityId,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub category: TaskCategory,
    pub deadline: Option<NaiveDate>,
    pub estimated_hours: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub progress: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            title: row.title,
            description: row.description,
            project_id: row.project_id,
            project_part_id: row.project_part_id,
            assigned_to: row.assigned_to,
            assigned_by: row.assigned_by,
            priority: row.priority,
            category: row.category,
            deadline: row.deadline,
            estimated_hours: row.estimated_hours,
            tags: row.tags,
            status: row.status,
            progress: clamp_progress(row.progress),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// What a task_history row records
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    Created,
    Updated,
    Assigned,
    ProgressUpdated,
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryAction::Created => write!(f, "created"),
            HistoryAction::Updated => write!(f, "updated"),
            HistoryAction::Assigned => write!(f, "assigned"),
            HistoryAction::ProgressUpdated => write!(f, "progress_updated"),
        }
    }
}

/// A comment on a task
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaskComment {
    pub id: EntityId,
    pub task_id: EntityId,
    pub user_id: EntityId,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Gateway {
    /// List all tasks, newest first
    pub async fn list_tasks(&self) -> GatewayResult<Vec<Task>> {
        let rows: Vec<TaskRow> = self
            .select("tasks", &[("select", "*"), ("order", "created_at.desc")])
            .await?;

        debug!("Retrieved {} tasks", rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a task; the backend defaults status to pending and progress to 0
    pub async fn create_task(&self, data: &TaskCreateInput) -> GatewayResult<Task> {
        let row: TaskRow = self
            .insert(
                "tasks",
                &json!({
                    "title": data.title,
                    "description": data.description,
                    "project_id": data.project_id,
                    "project_part_id": data.project_part_id,
                    "assigned_to": data.assigned_to,
                    "assigned_by": data.assigned_by,
                    "priority": data.priority,
                    "category": data.category,
                    "deadline": data.deadline,
                    "estimated_hours": data.estimated_hours,
                    "tags": data.tags,
                    "status": TaskStatus::Pending,
                    "progress": 0,
                }),
            )
            .await?;
        Ok(row.into())
    }

    pub async fn update_task(&self, id: &EntityId, data: &TaskUpdateInput) -> GatewayResult<Task> {
        let mut patch = serde_json::Map::new();
        if let Some(ref title) = data.title {
            patch.insert("title".into(), json!(title));
        }
        if let Some(ref description) = data.description {
            patch.insert("description".into(), json!(description));
        }
        if let Some(ref part_id) = data.project_part_id {
            patch.insert("project_part_id".into(), json!(part_id));
        }
        if let Some(ref assigned_to) = data.assigned_to {
            patch.insert("assigned_to".into(), json!(assigned_to));
        }
        if let Some(priority) = data.priority {
            patch.insert("priority".into(), json!(priority));
        }
        if let Some(category) = data.category {
            patch.insert("category".into(), json!(category));
        }
        if let Some(deadline) = data.deadline {
            patch.insert("deadline".into(), json!(deadline));
        }
        if let Some(hours) = data.estimated_hours {
            patch.insert("estimated_hours".into(), json!(hours));
        }
        if let Some(ref tags) = data.tags {
            patch.insert("tags".into(), json!(tags));
        }
        if let Some(status) = data.status {
            patch.insert("status".into(), json!(status));
        }
        if let Some(progress) = data.progress {
            patch.insert("progress".into(), json!(progress));
        }

        let row: TaskRow = self.update_by_id("tasks", id, &patch).await?;
        Ok(row.into())
    }

    pub async fn delete_task(&self, id: &EntityId) -> GatewayResult<()> {
        self.delete_by_id("tasks", id).await
    }

    /// Append a task_history row
    ///
    /// Secondary write: not transactional with the task write it records.
    /// Callers log and move on when this fails; history may lag or be
    /// missing under partial failure and is never read back for
    /// correctness.
    pub async fn record_history(
        &self,
        task_id: &EntityId,
        user_id: &EntityId,
        action: HistoryAction,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> GatewayResult<()> {
        self.insert_only(
            "task_history",
            &json!({
                "task_id": task_id,
                "user_id": user_id,
                "action": action,
                "old_value": old_value,
                "new_value": new_value,
            }),
        )
        .await
    }

    /// List comments on a task, oldest first
    pub async fn list_task_comments(&self, task_id: &EntityId) -> GatewayResult<Vec<TaskComment>> {
        let filter = format!("eq.{}", task_id);
        self.select(
            "task_comments",
            &[
                ("select", "*"),
                ("task_id", filter.as_str()),
                ("order", "created_at.asc"),
            ],
        )
        .await
    }

    pub async fn create_task_comment(
        &self,
        task_id: &EntityId,
        user_id: &EntityId,
        comment: &str,
    ) -> GatewayResult<TaskComment> {
        self.insert(
            "task_comments",
            &json!({
                "task_id": task_id,
                "user_id": user_id,
                "comment": comment,
            }),
        )
        .await
    }
}
