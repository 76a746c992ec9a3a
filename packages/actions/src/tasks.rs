// ABOUTME: Task lifecycle actions with best-effort history recording
// ABOUTME: The history insert is secondary; its failure never fails the primary write

use crate::dispatcher::{ActionError, ActionResult, Dispatcher};
use chrono::Utc;
use crewboard_core::{
    clamp_progress, validate_task_create, validate_task_update, EntityId, Task, TaskCreateInput,
    TaskUpdateInput,
};
use crewboard_gateway::{HistoryAction, TaskComment};
use crewboard_store::Mutation;
use tracing::warn;

impl Dispatcher {
    /// Best-effort task_history append; logs and moves on when it fails
    async fn record_history(
        &self,
        task_id: &EntityId,
        actor: &EntityId,
        action: HistoryAction,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) {
        if let Err(err) = self
            .gateway()
            .record_history(task_id, actor, action, old_value, new_value)
            .await
        {
            warn!(error = %err, task_id = %task_id, "task history write failed, continuing");
        }
    }

    /// Keep member task-id lists in step with an assignment change
    fn reassign_in_store(&self, task_id: &EntityId, from: Option<&EntityId>, to: &EntityId) {
        let updates: Vec<_> = self.store().read(|state| {
            let mut updates = Vec::new();
            if let Some(from) = from {
                if let Some(member) = state.member(from) {
                    let mut member = member.clone();
                    member.tasks.retain(|id| id != task_id);
                    updates.push(member);
                }
            }
            if let Some(member) = state.member(to) {
                let mut member = member.clone();
                if !member.tasks.contains(task_id) {
                    member.tasks.push(task_id.clone());
                }
                updates.push(member);
            }
            updates
        });
        for member in updates {
            self.dispatch(Mutation::UpdateMember(member));
        }
    }

    pub async fn create_task(&self, input: TaskCreateInput) -> ActionResult<Task> {
        let errors = validate_task_create(&input, Utc::now().date_naive());
        if !errors.is_empty() {
            return Err(ActionError::Validation(errors));
        }

        let task = self
            .run(
                async {
                    let task = self.gateway().create_task(&input).await?;
                    self.dispatch(Mutation::AddTask(task.clone()));
                    Ok(task)
                },
                ("Success", "Task created"),
                ("Error", "Failed to create task"),
            )
            .await?;

        self.record_history(
            &task.id,
            &task.assigned_by,
            HistoryAction::Created,
            None,
            Some(&task.title),
        )
        .await;
        self.reassign_in_store(&task.id, None, &task.assigned_to);

        Ok(task)
    }

    pub async fn update_task(
        &self,
        id: &EntityId,
        input: TaskUpdateInput,
        actor: &EntityId,
    ) -> ActionResult<Task> {
        let errors = validate_task_update(&input, Utc::now().date_naive());
        if !errors.is_empty() {
            return Err(ActionError::Validation(errors));
        }

        let previous = self.store().read(|s| s.task(id).cloned());

        let task = self
            .run(
                async {
                    let task = self.gateway().update_task(id, &input).await?;
                    self.dispatch(Mutation::UpdateTask(task.clone()));
                    Ok(task)
                },
                ("Success", "Task updated"),
                ("Error", "Failed to update task"),
            )
            .await?;

        self.record_history(
            &task.id,
            actor,
            HistoryAction::Updated,
            previous.as_ref().map(|t| t.title.as_str()),
            Some(&task.title),
        )
        .await;

        Ok(task)
    }

    pub async fn delete_task(&self, id: &EntityId) -> ActionResult<()> {
        self.run(
            async {
                self.gateway().delete_task(id).await?;
                self.dispatch(Mutation::DeleteTask(id.clone()));
                Ok(())
            },
            ("Success", "Task deleted"),
            ("Error", "Failed to delete task"),
        )
        .await
    }

    /// Reassign a task to another member
    pub async fn assign_task(
        &self,
        id: &EntityId,
        to: &EntityId,
        actor: &EntityId,
    ) -> ActionResult<Task> {
        let previous = self.store().read(|s| s.task(id).cloned());
        let previous_assignee = previous.as_ref().map(|t| t.assigned_to.clone());

        let input = TaskUpdateInput {
            assigned_to: Some(to.clone()),
            ..Default::default()
        };

        let task = self
            .run(
                async {
                    let task = self.gateway().update_task(id, &input).await?;
                    self.dispatch(Mutation::UpdateTask(task.clone()));
                    Ok(task)
                },
                ("Success", "Task assigned"),
                ("Error", "Failed to assign task"),
            )
            .await?;

        self.record_history(
            &task.id,
            actor,
            HistoryAction::Assigned,
            previous_assignee.as_deref(),
            Some(to.as_str()),
        )
        .await;
        self.reassign_in_store(&task.id, previous_assignee.as_ref(), to);

        Ok(task)
    }

    /// Step a task's progress; values clamp to [0, 100] rather than reject
    pub async fn update_task_progress(
        &self,
        id: &EntityId,
        progress: i64,
        actor: &EntityId,
    ) -> ActionResult<Task> {
        let progress = clamp_progress(progress);
        let previous = self.store().read(|s| s.task(id).map(|t| t.progress));

        let input = TaskUpdateInput {
            progress: Some(progress),
            ..Default::default()
        };

        let task = self
            .run(
                async {
                    let task = self.gateway().update_task(id, &input).await?;
                    self.dispatch(Mutation::UpdateTask(task.clone()));
                    Ok(task)
                },
                ("Success", "Progress updated"),
                ("Error", "Failed to update progress"),
            )
            .await?;

        let old = previous.map(|p| p.to_string());
        self.record_history(
            &task.id,
            actor,
            HistoryAction::ProgressUpdated,
            old.as_deref(),
            Some(&progress.to_string()),
        )
        .await;

        Ok(task)
    }

    /// Read-through to the comment log; comments are not held in the store
    pub async fn list_task_comments(&self, id: &EntityId) -> ActionResult<Vec<TaskComment>> {
        Ok(self.gateway().list_task_comments(id).await?)
    }

    pub async fn comment_on_task(
        &self,
        id: &EntityId,
        actor: &EntityId,
        text: &str,
    ) -> ActionResult<TaskComment> {
        self.run(
            async {
                let comment = self.gateway().create_task_comment(id, actor, text).await?;
                Ok(comment)
            },
            ("Success", "Comment added"),
            ("Error", "Failed to add comment"),
        )
        .await
    }
}
