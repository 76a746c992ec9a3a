// ABOUTME: The closed vocabulary of mutation messages the store accepts

use crewboard_core::{
    EntityId, Member, Notification, Project, ProjectPart, Role, Task, Team, Todo,
};

/// A named, data-carrying instruction that deterministically transforms
/// one snapshot into the next
///
/// Mutations referencing an id that is not in the snapshot are no-ops;
/// applying a mutation can never fail.
#[derive(Debug, Clone)]
pub enum Mutation {
    // Scalar preferences
    SetTheme(String),
    SetLanguage(String),
    SetRole(Role),

    // Wholesale collection replacement (initial load, change-feed refetch)
    SetProjects(Vec<Project>),
    SetTeams(Vec<Team>),
    SetMembers(Vec<Member>),
    SetTasks(Vec<Task>),

    // Per-entity upsert / replace / remove
    AddProject(Project),
    UpdateProject(Project),
    DeleteProject(EntityId),
    AddTeam(Team),
    UpdateTeam(Team),
    DeleteTeam(EntityId),
    AddMember(Member),
    UpdateMember(Member),
    DeleteMember(EntityId),
    AddTask(Task),
    UpdateTask(Task),
    DeleteTask(EntityId),

    // Nested project-part mutations
    AddPart {
        project_id: EntityId,
        part: ProjectPart,
    },
    UpdatePart {
        project_id: EntityId,
        part: ProjectPart,
    },
    DeletePart {
        project_id: EntityId,
        part_id: EntityId,
    },

    // Nested personal-todo mutations
    AddPersonalTodo {
        member_id: EntityId,
        todo: Todo,
    },
    UpdatePersonalTodo {
        member_id: EntityId,
        todo: Todo,
    },
    DeletePersonalTodo {
        member_id: EntityId,
        todo_id: EntityId,
    },

    // Selection
    SelectProject(Option<EntityId>),
    SelectTeam(Option<EntityId>),
    SelectMember(Option<EntityId>),

    // Transient flags and notifications
    SetLoading(bool),
    SetConnected(bool),
    SetError(Option<String>),
    AddNotification(Notification),
    RemoveNotification(i64),
}
