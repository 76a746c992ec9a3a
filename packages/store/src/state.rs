// ABOUTME: The application snapshot and the reducer that advances it
// ABOUTME: apply() is synchronous, side-effect free, and cannot fail

use crate::mutation::Mutation;
use crewboard_core::{
    clamp_progress, EntityId, Member, Notification, Project, Role, Task, Team,
};

/// The complete in-memory state tree at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub theme: String,
    pub language: String,
    pub role: Role,
    pub projects: Vec<Project>,
    pub teams: Vec<Team>,
    pub members: Vec<Member>,
    pub tasks: Vec<Task>,
    pub selected_project: Option<EntityId>,
    pub selected_team: Option<EntityId>,
    pub selected_member: Option<EntityId>,
    pub loading: bool,
    pub connected: bool,
    pub last_error: Option<String>,
    pub notifications: Vec<Notification>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("light", "en", Role::Manager)
    }
}

fn upsert<T>(collection: &mut Vec<T>, item: T, id_of: impl Fn(&T) -> &str) {
    let id = id_of(&item).to_string();
    match collection.iter().position(|existing| id_of(existing) == id) {
        Some(index) => collection[index] = item,
        None => collection.push(item),
    }
}

fn replace<T>(collection: &mut [T], item: T, id_of: impl Fn(&T) -> &str) {
    let id = id_of(&item).to_string();
    if let Some(index) = collection.iter().position(|existing| id_of(existing) == id) {
        collection[index] = item;
    }
}

fn remove<T>(collection: &mut Vec<T>, id: &str, id_of: impl Fn(&T) -> &str) {
    collection.retain(|existing| id_of(existing) != id);
}

/// Drop later duplicates so a wholesale replace can never seed duplicate ids
fn dedup_by_id<T>(items: Vec<T>, id_of: impl Fn(&T) -> &str) -> Vec<T> {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let id = id_of(&item).to_string();
        if !seen.contains(&id) {
            seen.push(id);
            out.push(item);
        }
    }
    out
}

fn clamp_project(project: &mut Project) {
    project.progress = clamp_progress(project.progress as i64);
    for part in &mut project.parts {
        part.progress = clamp_progress(part.progress as i64);
    }
}

fn clamp_team(team: &mut Team) {
    team.progress = clamp_progress(team.progress as i64);
}

fn clamp_task(task: &mut Task) {
    task.progress = clamp_progress(task.progress as i64);
}

impl AppState {
    pub fn new(theme: impl Into<String>, language: impl Into<String>, role: Role) -> Self {
        AppState {
            theme: theme.into(),
            language: language.into(),
            role,
            projects: Vec::new(),
            teams: Vec::new(),
            members: Vec::new(),
            tasks: Vec::new(),
            selected_project: None,
            selected_team: None,
            selected_member: None,
            loading: false,
            connected: false,
            last_error: None,
            notifications: Vec::new(),
        }
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// First member carrying the given role, in collection order
    pub fn first_member_with_role(&self, role: Role) -> Option<&Member> {
        self.members.iter().find(|m| m.role == role)
    }

    fn revalidate_selection(&mut self) {
        if let Some(ref id) = self.selected_project {
            if self.project(id).is_none() {
                self.selected_project = None;
            }
        }
        if let Some(ref id) = self.selected_team {
            if self.team(id).is_none() {
                self.selected_team = None;
            }
        }
        if let Some(ref id) = self.selected_member {
            if self.member(id).is_none() {
                self.selected_member = None;
            }
        }
    }

    /// Apply one mutation message, producing the next snapshot in place
    ///
    /// Progress values clamp to [0, 100] here, at the write boundary, so
    /// no view ever needs to clamp again. Messages naming an absent id
    /// are no-ops.
    pub fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::SetTheme(theme) => self.theme = theme,
            Mutation::SetLanguage(language) => self.language = language,
            Mutation::SetRole(role) => self.role = role,

            Mutation::SetProjects(projects) => {
                let mut projects = dedup_by_id(projects, |p| &p.id);
                projects.iter_mut().for_each(clamp_project);
                self.projects = projects;
                self.revalidate_selection();
            }
            Mutation::SetTeams(teams) => {
                let mut teams = dedup_by_id(teams, |t| &t.id);
                teams.iter_mut().for_each(clamp_team);
                self.teams = teams;
                self.revalidate_selection();
            }
            Mutation::SetMembers(members) => {
                self.members = dedup_by_id(members, |m| &m.id);
                self.revalidate_selection();
            }
            Mutation::SetTasks(tasks) => {
                let mut tasks = dedup_by_id(tasks, |t| &t.id);
                tasks.iter_mut().for_each(clamp_task);
                self.tasks = tasks;
            }

            Mutation::AddProject(mut project) => {
                clamp_project(&mut project);
                upsert(&mut self.projects, project, |p| &p.id);
            }
            Mutation::UpdateProject(mut project) => {
                clamp_project(&mut project);
                replace(&mut self.projects, project, |p| &p.id);
            }
            Mutation::DeleteProject(id) => {
                remove(&mut self.projects, &id, |p| &p.id);
                self.revalidate_selection();
            }

            Mutation::AddTeam(mut team) => {
                clamp_team(&mut team);
                upsert(&mut self.teams, team, |t| &t.id);
            }
            Mutation::UpdateTeam(mut team) => {
                clamp_team(&mut team);
                replace(&mut self.teams, team, |t| &t.id);
            }
            Mutation::DeleteTeam(id) => {
                remove(&mut self.teams, &id, |t| &t.id);
                self.revalidate_selection();
            }

            Mutation::AddMember(member) => {
                upsert(&mut self.members, member, |m| &m.id);
            }
            Mutation::UpdateMember(member) => {
                replace(&mut self.members, member, |m| &m.id);
            }
            Mutation::DeleteMember(id) => {
                remove(&mut self.members, &id, |m| &m.id);
                self.revalidate_selection();
            }

            Mutation::AddTask(mut task) => {
                clamp_task(&mut task);
                upsert(&mut self.tasks, task, |t| &t.id);
            }
            Mutation::UpdateTask(mut task) => {
                clamp_task(&mut task);
                replace(&mut self.tasks, task, |t| &t.id);
            }
            Mutation::DeleteTask(id) => {
                remove(&mut self.tasks, &id, |t| &t.id);
            }

            Mutation::AddPart { project_id, mut part } => {
                part.progress = clamp_progress(part.progress as i64);
                if let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) {
                    upsert(&mut project.parts, part, |p| &p.id);
                }
            }
            Mutation::UpdatePart { project_id, mut part } => {
                part.progress = clamp_progress(part.progress as i64);
                if let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) {
                    replace(&mut project.parts, part, |p| &p.id);
                }
            }
            Mutation::DeletePart { project_id, part_id } => {
                if let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) {
                    remove(&mut project.parts, &part_id, |p| &p.id);
                }
            }

            Mutation::AddPersonalTodo { member_id, todo } => {
                if let Some(member) = self.members.iter_mut().find(|m| m.id == member_id) {
                    upsert(&mut member.personal_todos, todo, |t| &t.id);
                }
            }
            Mutation::UpdatePersonalTodo { member_id, todo } => {
                if let Some(member) = self.members.iter_mut().find(|m| m.id == member_id) {
                    replace(&mut member.personal_todos, todo, |t| &t.id);
                }
            }
            Mutation::DeletePersonalTodo { member_id, todo_id } => {
                if let Some(member) = self.members.iter_mut().find(|m| m.id == member_id) {
                    remove(&mut member.personal_todos, &todo_id, |t| &t.id);
                }
            }

            Mutation::SelectProject(id) => {
                self.selected_project = id.filter(|id| self.projects.iter().any(|p| &p.id == id));
            }
            Mutation::SelectTeam(id) => {
                self.selected_team = id.filter(|id| self.teams.iter().any(|t| &t.id == id));
            }
            Mutation::SelectMember(id) => {
                self.selected_member = id.filter(|id| self.members.iter().any(|m| &m.id == id));
            }

            Mutation::SetLoading(loading) => self.loading = loading,
            Mutation::SetConnected(connected) => self.connected = connected,
            Mutation::SetError(error) => self.last_error = error,

            Mutation::AddNotification(notification) => {
                self.notifications.push(notification);
            }
            Mutation::RemoveNotification(id) => {
                self.notifications.retain(|n| n.id != id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewboard_core::{ProjectPart, ProjectStatus, Severity, Todo};
    use pretty_assertions::assert_eq;

    fn project(id: &str, name: &str, progress: u8) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            manager: "John Smith".to_string(),
            manager_id: Some("u1".to_string()),
            deadline: None,
            progress,
            status: ProjectStatus::Active,
            teams: vec![],
            parts: vec![],
            activity_log: vec![],
        }
    }

    fn member(id: &str, name: &str, role: Role) -> Member {
        Member {
            id: id.to_string(),
            name: name.to_string(),
            email: None,
            role,
            team_id: None,
            tasks: vec![],
            personal_todos: vec![],
        }
    }

    fn part(id: &str, name: &str) -> ProjectPart {
        ProjectPart {
            id: id.to_string(),
            project_id: "p1".to_string(),
            name: name.to_string(),
            description: None,
            weight: 50,
            progress: 0,
            todos: vec![],
        }
    }

    #[test]
    fn test_add_project_clamps_progress_at_write() {
        let mut state = AppState::default();
        state.apply(Mutation::SetProjects(vec![]));
        state.apply(Mutation::AddProject(project("1", "X", 150)));

        assert_eq!(state.projects.len(), 1);
        assert_eq!(state.projects[0].id, "1");
        // Clamped once at the store boundary; displays read it as-is
        assert_eq!(state.projects[0].progress, 100);
    }

    #[test]
    fn test_add_twice_never_duplicates_ids() {
        let mut state = AppState::default();
        state.apply(Mutation::AddProject(project("p1", "First", 10)));
        state.apply(Mutation::AddProject(project("p1", "Second", 20)));

        assert_eq!(state.projects.len(), 1);
        assert_eq!(state.projects[0].name, "Second");
    }

    #[test]
    fn test_set_collection_dedups_by_id() {
        let mut state = AppState::default();
        state.apply(Mutation::SetProjects(vec![
            project("p1", "Kept", 10),
            project("p2", "Other", 20),
            project("p1", "Dropped", 30),
        ]));

        assert_eq!(state.projects.len(), 2);
        assert_eq!(state.projects[0].name, "Kept");
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut state = AppState::default();
        state.apply(Mutation::SetProjects(vec![
            project("p1", "A", 0),
            project("p2", "B", 0),
            project("p3", "C", 0),
        ]));
        let before = state.projects.clone();

        state.apply(Mutation::DeleteProject("p2".to_string()));

        assert_eq!(state.projects.len(), 2);
        assert_eq!(state.projects[0], before[0]);
        assert_eq!(state.projects[1], before[2]);
    }

    #[test]
    fn test_update_replaces_only_matching_and_is_idempotent() {
        let mut state = AppState::default();
        state.apply(Mutation::SetProjects(vec![
            project("p1", "A", 0),
            project("p2", "B", 0),
        ]));

        let updated = project("p1", "A2", 40);
        state.apply(Mutation::UpdateProject(updated.clone()));
        let once = state.clone();
        state.apply(Mutation::UpdateProject(updated));
        assert_eq!(state, once);

        assert_eq!(state.projects[0].name, "A2");
        assert_eq!(state.projects[1].name, "B");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut state = AppState::default();
        state.apply(Mutation::SetProjects(vec![project("p1", "A", 0)]));
        let before = state.clone();

        state.apply(Mutation::UpdateProject(project("ghost", "Z", 0)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_add_part_to_unknown_project_is_noop() {
        let mut state = AppState::default();
        state.apply(Mutation::SetProjects(vec![project("p1", "A", 0)]));
        let before = state.clone();

        state.apply(Mutation::AddPart {
            project_id: "ghost".to_string(),
            part: part("pp1", "Frontend"),
        });

        assert_eq!(state, before);
    }

    #[test]
    fn test_add_and_delete_part() {
        let mut state = AppState::default();
        state.apply(Mutation::SetProjects(vec![project("p1", "A", 0)]));

        state.apply(Mutation::AddPart {
            project_id: "p1".to_string(),
            part: part("pp1", "Frontend"),
        });
        assert_eq!(state.projects[0].parts.len(), 1);

        state.apply(Mutation::DeletePart {
            project_id: "p1".to_string(),
            part_id: "pp1".to_string(),
        });
        assert!(state.projects[0].parts.is_empty());
    }

    #[test]
    fn test_last_update_wins_by_dispatch_order() {
        let mut state = AppState::default();
        state.apply(Mutation::SetMembers(vec![member("m1", "Alice", Role::Member)]));

        state.apply(Mutation::UpdateMember(member("m1", "Alice", Role::TeamLead)));
        state.apply(Mutation::UpdateMember(member("m1", "Alice", Role::Manager)));

        assert_eq!(state.members[0].role, Role::Manager);
    }

    #[test]
    fn test_personal_todo_lifecycle() {
        let mut state = AppState::default();
        state.apply(Mutation::SetMembers(vec![member("m1", "Alice", Role::Member)]));

        let todo = Todo {
            id: "td1".to_string(),
            text: "Review docs".to_string(),
            completed: false,
        };
        state.apply(Mutation::AddPersonalTodo {
            member_id: "m1".to_string(),
            todo: todo.clone(),
        });
        assert_eq!(state.members[0].personal_todos.len(), 1);

        let done = Todo {
            completed: true,
            ..todo
        };
        state.apply(Mutation::UpdatePersonalTodo {
            member_id: "m1".to_string(),
            todo: done,
        });
        assert!(state.members[0].personal_todos[0].completed);

        state.apply(Mutation::DeletePersonalTodo {
            member_id: "m1".to_string(),
            todo_id: "td1".to_string(),
        });
        assert!(state.members[0].personal_todos.is_empty());
    }

    #[test]
    fn test_personal_todo_on_unknown_member_is_noop() {
        let mut state = AppState::default();
        let before = state.clone();
        state.apply(Mutation::AddPersonalTodo {
            member_id: "ghost".to_string(),
            todo: Todo {
                id: "td1".to_string(),
                text: "Lost".to_string(),
                completed: false,
            },
        });
        assert_eq!(state, before);
    }

    #[test]
    fn test_selection_cleared_when_entity_disappears() {
        let mut state = AppState::default();
        state.apply(Mutation::SetProjects(vec![project("p1", "A", 0)]));
        state.apply(Mutation::SelectProject(Some("p1".to_string())));
        assert_eq!(state.selected_project.as_deref(), Some("p1"));

        state.apply(Mutation::DeleteProject("p1".to_string()));
        assert_eq!(state.selected_project, None);
    }

    #[test]
    fn test_select_unknown_id_stays_empty() {
        let mut state = AppState::default();
        state.apply(Mutation::SelectProject(Some("ghost".to_string())));
        assert_eq!(state.selected_project, None);
    }

    #[test]
    fn test_notifications_add_and_remove() {
        let mut state = AppState::default();
        let n = Notification {
            id: 42,
            severity: Severity::Success,
            title: "Saved".to_string(),
            message: "Project created".to_string(),
        };
        state.apply(Mutation::AddNotification(n));
        assert_eq!(state.notifications.len(), 1);

        state.apply(Mutation::RemoveNotification(42));
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn test_first_member_with_role() {
        let mut state = AppState::default();
        state.apply(Mutation::SetMembers(vec![
            member("m1", "Alice", Role::Member),
            member("m2", "Mike", Role::Manager),
            member("m3", "Sarah", Role::Manager),
        ]));

        let found = state.first_member_with_role(Role::Manager).unwrap();
        assert_eq!(found.id, "m2");
        assert!(state.first_member_with_role(Role::TeamLead).is_none());
    }
}
