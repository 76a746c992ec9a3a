// ABOUTME: Entity model for the Crewboard client
// ABOUTME: Typed records decoupling the application from backend row shapes

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque stable key assigned by the backend on creation
pub type EntityId = String;

/// Clamp a raw progress value to the displayable [0, 100] range
pub fn clamp_progress(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}

/// Member roles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Manager,
    TeamLead,
    Member,
}

impl Default for Role {
    fn default() -> Self {
        Role::Member
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Manager => write!(f, "Manager"),
            Role::TeamLead => write!(f, "Team Lead"),
            Role::Member => write!(f, "Member"),
        }
    }
}

/// Status options for projects
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
    Pending,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Active
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Active => write!(f, "Active"),
            ProjectStatus::Completed => write!(f, "Completed"),
            ProjectStatus::OnHold => write!(f, "On Hold"),
            ProjectStatus::Pending => write!(f, "Pending"),
        }
    }
}

/// Task status options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "Pending"),
            TaskStatus::InProgress => write!(f, "In Progress"),
            TaskStatus::Completed => write!(f, "Completed"),
            TaskStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Task priority levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskPriority::Low => write!(f, "Low"),
            TaskPriority::Medium => write!(f, "Medium"),
            TaskPriority::High => write!(f, "High"),
            TaskPriority::Urgent => write!(f, "Urgent"),
        }
    }
}

/// Task work categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Development,
    Design,
    Testing,
    Documentation,
    Meeting,
    Review,
    General,
}

impl Default for TaskCategory {
    fn default() -> Self {
        TaskCategory::General
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskCategory::Development => "Development",
            TaskCategory::Design => "Design",
            TaskCategory::Testing => "Testing",
            TaskCategory::Documentation => "Documentation",
            TaskCategory::Meeting => "Meeting",
            TaskCategory::Review => "Review",
            TaskCategory::General => "General",
        };
        write!(f, "{}", label)
    }
}

/// A checklist item, either part-scoped or member-personal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    pub id: EntityId,
    pub text: String,
    pub completed: bool,
}

/// A weighted slice of a project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectPart {
    pub id: EntityId,
    #[serde(rename = "projectId")]
    pub project_id: EntityId,
    pub name: String,
    pub description: Option<String>,
    /// Percentage contribution to the parent project's progress (1-100)
    pub weight: u8,
    pub progress: u8,
    pub todos: Vec<Todo>,
}

/// One append-only project activity line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityEntry {
    pub date: NaiveDate,
    pub message: String,
}

/// A project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    /// Display name of the managing member
    pub manager: String,
    #[serde(rename = "managerId")]
    pub manager_id: Option<EntityId>,
    pub deadline: Option<NaiveDate>,
    pub progress: u8,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Ids of teams assigned to this project
    pub teams: Vec<EntityId>,
    pub parts: Vec<ProjectPart>,
    #[serde(rename = "activityLog")]
    pub activity_log: Vec<ActivityEntry>,
}

/// A team
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: EntityId,
    pub name: String,
    /// Display name of the team lead
    pub lead: String,
    #[serde(rename = "leadId")]
    pub lead_id: Option<EntityId>,
    pub deadline: Option<NaiveDate>,
    pub progress: u8,
    #[serde(rename = "projectId")]
    pub project_id: Option<EntityId>,
    /// Ids of the member roster
    pub members: Vec<EntityId>,
}

/// A member (a "user" row in the backend)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: EntityId,
    pub name: String,
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(rename = "teamId")]
    pub team_id: Option<EntityId>,
    /// Ids of tasks currently assigned to this member
    pub tasks: Vec<EntityId>,
    #[serde(rename = "personalTodos")]
    pub personal_todos: Vec<Todo>,
}

/// A task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "projectId")]
    pub project_id: EntityId,
    #[serde(rename = "projectPartId")]
    pub project_part_id: Option<EntityId>,
    #[serde(rename = "assignedTo")]
    pub assigned_to: EntityId,
    #[serde(rename = "assignedBy")]
    pub assigned_by: EntityId,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub category: TaskCategory,
    pub deadline: Option<NaiveDate>,
    /// Estimated effort in hours, 1-200 when present
    #[serde(rename = "estimatedHours")]
    pub estimated_hours: Option<u32>,
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: TaskStatus,
    pub progress: u8,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Notification severity levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A transient user-facing notification, never persisted remotely
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    /// Creation timestamp in milliseconds, doubling as the removal key
    pub id: i64,
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    /// Stamp a new notification with the current time as its id
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            id: Utc::now().timestamp_millis(),
            severity,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, message)
    }
}

/// Input for creating a new project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectCreateInput {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "managerId")]
    pub manager_id: Option<EntityId>,
    pub deadline: Option<NaiveDate>,
}

/// Input for updating an existing project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdateInput {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "managerId")]
    pub manager_id: Option<EntityId>,
    pub deadline: Option<NaiveDate>,
    pub progress: Option<u8>,
    pub status: Option<ProjectStatus>,
}

/// Input for creating a new team
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamCreateInput {
    pub name: String,
    #[serde(rename = "leadId")]
    pub lead_id: Option<EntityId>,
    #[serde(rename = "projectId")]
    pub project_id: Option<EntityId>,
    pub deadline: Option<NaiveDate>,
}

/// Input for updating an existing team
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamUpdateInput {
    pub name: Option<String>,
    #[serde(rename = "leadId")]
    pub lead_id: Option<EntityId>,
    #[serde(rename = "projectId")]
    pub project_id: Option<EntityId>,
    pub deadline: Option<NaiveDate>,
    pub progress: Option<u8>,
}

/// Input for creating a new member
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberCreateInput {
    pub name: String,
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(rename = "teamId")]
    pub team_id: Option<EntityId>,
}

/// Input for updating an existing member
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberUpdateInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    #[serde(rename = "teamId")]
    pub team_id: Option<EntityId>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreateInput {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "projectId")]
    pub project_id: EntityId,
    #[serde(rename = "projectPartId")]
    pub project_part_id: Option<EntityId>,
    #[serde(rename = "assignedTo")]
    pub assigned_to: EntityId,
    #[serde(rename = "assignedBy")]
    pub assigned_by: EntityId,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub category: TaskCategory,
    pub deadline: Option<NaiveDate>,
    #[serde(rename = "estimatedHours")]
    pub estimated_hours: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Input for updating an existing task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdateInput {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "projectPartId")]
    pub project_part_id: Option<EntityId>,
    #[serde(rename = "assignedTo")]
    pub assigned_to: Option<EntityId>,
    pub priority: Option<TaskPriority>,
    pub category: Option<TaskCategory>,
    pub deadline: Option<NaiveDate>,
    #[serde(rename = "estimatedHours")]
    pub estimated_hours: Option<u32>,
    pub tags: Option<Vec<String>>,
    pub status: Option<TaskStatus>,
    pub progress: Option<u8>,
}

/// Input for creating a project part
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartCreateInput {
    pub name: String,
    pub description: Option<String>,
    pub weight: u8,
    pub progress: Option<u8>,
}

/// Input for updating a project part
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartUpdateInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub weight: Option<u8>,
    pub progress: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clamp_progress_bounds() {
        assert_eq!(clamp_progress(-10), 0);
        assert_eq!(clamp_progress(0), 0);
        assert_eq!(clamp_progress(42), 42);
        assert_eq!(clamp_progress(100), 100);
        assert_eq!(clamp_progress(150), 100);
    }

    #[test]
    fn test_role_serde_camel_case() {
        assert_eq!(serde_json::to_string(&Role::TeamLead).unwrap(), "\"teamLead\"");
        let role: Role = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(role, Role::Manager);
    }

    #[test]
    fn test_project_status_serde_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::OnHold).unwrap(),
            "\"on-hold\""
        );
        let status: ProjectStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, ProjectStatus::Pending);
    }

    #[test]
    fn test_task_status_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn test_notification_ids_are_timestamps() {
        let before = Utc::now().timestamp_millis();
        let n = Notification::success("Saved", "Project created");
        let after = Utc::now().timestamp_millis();
        assert!(n.id >= before && n.id <= after);
        assert_eq!(n.severity, Severity::Success);
    }
}
