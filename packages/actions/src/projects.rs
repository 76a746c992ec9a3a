// ABOUTME: Project actions, including part and part-todo lifecycle

use crate::dispatcher::{ActionError, ActionResult, Dispatcher};
use chrono::Utc;
use crewboard_core::{
    validate_part, validate_project_create, EntityId, PartCreateInput, PartUpdateInput, Project,
    ProjectCreateInput, ProjectPart, ProjectUpdateInput, Role, Todo,
};
use crewboard_gateway::TodoScope;
use crewboard_store::Mutation;

impl Dispatcher {
    /// Resolve the manager for a new project: explicit id, else the first
    /// member matching the current role, else the first manager on file
    fn resolve_manager_id(&self, explicit: Option<EntityId>) -> Option<EntityId> {
        if explicit.is_some() {
            return explicit;
        }
        self.store().read(|state| {
            state
                .first_member_with_role(state.role)
                .or_else(|| state.first_member_with_role(Role::Manager))
                .map(|m| m.id.clone())
        })
    }

    pub async fn create_project(&self, mut input: ProjectCreateInput) -> ActionResult<Project> {
        let errors = validate_project_create(&input, Utc::now().date_naive());
        if !errors.is_empty() {
            return Err(ActionError::Validation(errors));
        }

        // Resolved before the round trip so a foredoomed request never
        // leaves the client
        input.manager_id = match self.resolve_manager_id(input.manager_id.take()) {
            Some(id) => Some(id),
            None => {
                return self.fail_fast(
                    ActionError::NoManagerAvailable,
                    ("Error", "Failed to create project"),
                )
            }
        };

        self.run(
            async {
                let project = self.gateway().create_project(&input).await?;
                self.dispatch(Mutation::AddProject(project.clone()));
                Ok(project)
            },
            ("Success", "Project created"),
            ("Error", "Failed to create project"),
        )
        .await
    }

    pub async fn update_project(
        &self,
        id: &EntityId,
        input: ProjectUpdateInput,
    ) -> ActionResult<Project> {
        self.run(
            async {
                let project = self.gateway().update_project(id, &input).await?;
                self.dispatch(Mutation::UpdateProject(project.clone()));
                Ok(project)
            },
            ("Success", "Project updated"),
            ("Error", "Failed to update project"),
        )
        .await
    }

    pub async fn delete_project(&self, id: &EntityId) -> ActionResult<()> {
        self.run(
            async {
                self.gateway().delete_project(id).await?;
                self.dispatch(Mutation::DeleteProject(id.clone()));
                Ok(())
            },
            ("Success", "Project deleted"),
            ("Error", "Failed to delete project"),
        )
        .await
    }

    /// Attach an existing team to a project
    pub async fn add_team_to_project(
        &self,
        project_id: &EntityId,
        team_id: &EntityId,
    ) -> ActionResult<()> {
        let project = match self.store().read(|s| s.project(project_id).cloned()) {
            Some(project) => project,
            None => {
                return self.fail_fast(
                    ActionError::MissingEntity(format!("project {}", project_id)),
                    ("Error", "Failed to update project"),
                )
            }
        };

        self.run(
            async {
                self.gateway().add_project_team(project_id, team_id).await?;
                let mut updated = project;
                if !updated.teams.contains(team_id) {
                    updated.teams.push(team_id.clone());
                }
                self.dispatch(Mutation::UpdateProject(updated));
                Ok(())
            },
            ("Success", "Team assigned to project"),
            ("Error", "Failed to update project"),
        )
        .await
    }

    pub async fn add_part(
        &self,
        project_id: &EntityId,
        input: PartCreateInput,
    ) -> ActionResult<ProjectPart> {
        let errors = validate_part(&input);
        if !errors.is_empty() {
            return Err(ActionError::Validation(errors));
        }

        self.run(
            async {
                let part = self.gateway().create_part(project_id, &input).await?;
                self.dispatch(Mutation::AddPart {
                    project_id: project_id.clone(),
                    part: part.clone(),
                });
                Ok(part)
            },
            ("Success", "Part added"),
            ("Error", "Failed to add part"),
        )
        .await
    }

    pub async fn update_part(
        &self,
        project_id: &EntityId,
        part_id: &EntityId,
        input: PartUpdateInput,
    ) -> ActionResult<ProjectPart> {
        self.run(
            async {
                let part = self.gateway().update_part(part_id, &input).await?;
                self.dispatch(Mutation::UpdatePart {
                    project_id: project_id.clone(),
                    part: part.clone(),
                });
                Ok(part)
            },
            ("Success", "Part updated"),
            ("Error", "Failed to update part"),
        )
        .await
    }

    pub async fn delete_part(&self, project_id: &EntityId, part_id: &EntityId) -> ActionResult<()> {
        self.run(
            async {
                self.gateway().delete_part(part_id).await?;
                self.dispatch(Mutation::DeletePart {
                    project_id: project_id.clone(),
                    part_id: part_id.clone(),
                });
                Ok(())
            },
            ("Success", "Part deleted"),
            ("Error", "Failed to delete part"),
        )
        .await
    }

    fn part_in_store(&self, project_id: &EntityId, part_id: &EntityId) -> Option<ProjectPart> {
        self.store().read(|s| {
            s.project(project_id)
                .and_then(|p| p.parts.iter().find(|part| &part.id == part_id).cloned())
        })
    }

    /// Add a checklist item to a project part
    pub async fn add_part_todo(
        &self,
        project_id: &EntityId,
        part_id: &EntityId,
        text: &str,
    ) -> ActionResult<Todo> {
        let part = match self.part_in_store(project_id, part_id) {
            Some(part) => part,
            None => {
                return self.fail_fast(
                    ActionError::MissingEntity(format!("part {}", part_id)),
                    ("Error", "Failed to add todo"),
                )
            }
        };

        self.run(
            async {
                let todo = self
                    .gateway()
                    .create_todo(&TodoScope::Part(part_id.clone()), text)
                    .await?;
                let mut updated = part;
                updated.todos.push(todo.clone());
                self.dispatch(Mutation::UpdatePart {
                    project_id: project_id.clone(),
                    part: updated,
                });
                Ok(todo)
            },
            ("Success", "Todo added"),
            ("Error", "Failed to add todo"),
        )
        .await
    }

    /// Flip a part checklist item between done and not-done
    pub async fn toggle_part_todo(
        &self,
        project_id: &EntityId,
        part_id: &EntityId,
        todo_id: &EntityId,
    ) -> ActionResult<Todo> {
        let part = match self.part_in_store(project_id, part_id) {
            Some(part) => part,
            None => {
                return self.fail_fast(
                    ActionError::MissingEntity(format!("part {}", part_id)),
                    ("Error", "Failed to update todo"),
                )
            }
        };
        let current = match part.todos.iter().find(|t| &t.id == todo_id) {
            Some(todo) => todo.clone(),
            None => {
                return self.fail_fast(
                    ActionError::MissingEntity(format!("todo {}", todo_id)),
                    ("Error", "Failed to update todo"),
                )
            }
        };

        self.run(
            async {
                let todo = self
                    .gateway()
                    .update_todo(todo_id, None, Some(!current.completed))
                    .await?;
                let mut updated = part;
                if let Some(slot) = updated.todos.iter_mut().find(|t| &t.id == todo_id) {
                    *slot = todo.clone();
                }
                self.dispatch(Mutation::UpdatePart {
                    project_id: project_id.clone(),
                    part: updated,
                });
                Ok(todo)
            },
            ("Success", "Todo updated"),
            ("Error", "Failed to update todo"),
        )
        .await
    }

    pub async fn delete_part_todo(
        &self,
        project_id: &EntityId,
        part_id: &EntityId,
        todo_id: &EntityId,
    ) -> ActionResult<()> {
        let part = match self.part_in_store(project_id, part_id) {
            Some(part) => part,
            None => {
                return self.fail_fast(
                    ActionError::MissingEntity(format!("part {}", part_id)),
                    ("Error", "Failed to delete todo"),
                )
            }
        };

        self.run(
            async {
                self.gateway().delete_todo(todo_id).await?;
                let mut updated = part;
                updated.todos.retain(|t| &t.id != todo_id);
                self.dispatch(Mutation::UpdatePart {
                    project_id: project_id.clone(),
                    part: updated,
                });
                Ok(())
            },
            ("Success", "Todo deleted"),
            ("Error", "Failed to delete todo"),
        )
        .await
    }
}
