// ABOUTME: Member actions, including the personal todo list

use crate::dispatcher::{ActionError, ActionResult, Dispatcher};
use crewboard_core::{EntityId, Member, MemberCreateInput, MemberUpdateInput, Todo};
use crewboard_gateway::TodoScope;
use crewboard_store::Mutation;

impl Dispatcher {
    pub async fn create_member(&self, input: MemberCreateInput) -> ActionResult<Member> {
        if input.name.trim().is_empty() {
            return Err(ActionError::Validation(vec![
                crewboard_core::ValidationError::new("name", "Member name is required"),
            ]));
        }

        self.run(
            async {
                let member = self.gateway().create_user(&input).await?;
                self.dispatch(Mutation::AddMember(member.clone()));
                Ok(member)
            },
            ("Success", "Member created"),
            ("Error", "Failed to create member"),
        )
        .await
    }

    pub async fn update_member(
        &self,
        id: &EntityId,
        input: MemberUpdateInput,
    ) -> ActionResult<Member> {
        self.run(
            async {
                let member = self.gateway().update_user(id, &input).await?;
                self.dispatch(Mutation::UpdateMember(member.clone()));
                Ok(member)
            },
            ("Success", "Member updated"),
            ("Error", "Failed to update member"),
        )
        .await
    }

    pub async fn delete_member(&self, id: &EntityId) -> ActionResult<()> {
        self.run(
            async {
                self.gateway().delete_user(id).await?;
                self.dispatch(Mutation::DeleteMember(id.clone()));
                Ok(())
            },
            ("Success", "Member deleted"),
            ("Error", "Failed to delete member"),
        )
        .await
    }

    pub async fn add_personal_todo(&self, member_id: &EntityId, text: &str) -> ActionResult<Todo> {
        self.run(
            async {
                let todo = self
                    .gateway()
                    .create_todo(&TodoScope::Personal(member_id.clone()), text)
                    .await?;
                self.dispatch(Mutation::AddPersonalTodo {
                    member_id: member_id.clone(),
                    todo: todo.clone(),
                });
                Ok(todo)
            },
            ("Success", "Todo added"),
            ("Error", "Failed to add todo"),
        )
        .await
    }

    /// Flip a personal todo between done and not-done
    pub async fn toggle_personal_todo(
        &self,
        member_id: &EntityId,
        todo_id: &EntityId,
    ) -> ActionResult<Todo> {
        let current = self.store().read(|s| {
            s.member(member_id)
                .and_then(|m| m.personal_todos.iter().find(|t| &t.id == todo_id).cloned())
        });
        let current = match current {
            Some(todo) => todo,
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
                self.dispatch(Mutation::UpdatePersonalTodo {
                    member_id: member_id.clone(),
                    todo: todo.clone(),
                });
                Ok(todo)
            },
            ("Success", "Todo updated"),
            ("Error", "Failed to update todo"),
        )
        .await
    }

    pub async fn delete_personal_todo(
        &self,
        member_id: &EntityId,
        todo_id: &EntityId,
    ) -> ActionResult<()> {
        self.run(
            async {
                self.gateway().delete_todo(todo_id).await?;
                self.dispatch(Mutation::DeletePersonalTodo {
                    member_id: member_id.clone(),
                    todo_id: todo_id.clone(),
                });
                Ok(())
            },
            ("Success", "Todo deleted"),
            ("Error", "Failed to delete todo"),
        )
        .await
    }
}
