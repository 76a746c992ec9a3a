// ABOUTME: Core types and validation for Crewboard
// ABOUTME: Foundational package providing the entity model shared across all Crewboard packages

pub mod types;
pub mod validation;

// Re-export main types
pub use types::{
    clamp_progress, ActivityEntry, EntityId, Member, MemberCreateInput, MemberUpdateInput,
    Notification, PartCreateInput, PartUpdateInput, Project, ProjectCreateInput, ProjectPart,
    ProjectStatus, ProjectUpdateInput, Role, Severity, Task, TaskCategory, TaskCreateInput,
    TaskPriority, TaskStatus, TaskUpdateInput, Team, TeamCreateInput, TeamUpdateInput, Todo,
};

// Re-export validation
pub use validation::{
    validate_part, validate_project_create, validate_task_create, validate_task_update,
    validate_team_create, ValidationError,
};
