// ABOUTME: Client-side validation for entity inputs
// ABOUTME: Runs at the form boundary so invalid data never reaches the network

use crate::types::{
    PartCreateInput, ProjectCreateInput, TaskCreateInput, TaskUpdateInput, TeamCreateInput,
};
use chrono::NaiveDate;

/// Valid range for task effort estimates, in hours
pub const ESTIMATED_HOURS_MIN: u32 = 1;
pub const ESTIMATED_HOURS_MAX: u32 = 200;

/// Validation errors keyed by the offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn check_estimated_hours(hours: Option<u32>, errors: &mut Vec<ValidationError>) {
    if let Some(hours) = hours {
        if !(ESTIMATED_HOURS_MIN..=ESTIMATED_HOURS_MAX).contains(&hours) {
            errors.push(ValidationError::new(
                "estimatedHours",
                format!(
                    "Estimated hours must be between {} and {}",
                    ESTIMATED_HOURS_MIN, ESTIMATED_HOURS_MAX
                ),
            ));
        }
    }
}

fn check_future_deadline(
    deadline: Option<NaiveDate>,
    today: NaiveDate,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(deadline) = deadline {
        // Strictly future: a deadline of today is already too late to plan for
        if deadline <= today {
            errors.push(ValidationError::new(
                "deadline",
                "Deadline must be a future date",
            ));
        }
    }
}

fn check_tags(tags: &[String], errors: &mut Vec<ValidationError>) {
    for tag in tags {
        if tag.trim().is_empty() {
            errors.push(ValidationError::new("tags", "Tags cannot be empty"));
            break;
        }
    }
}

/// Validates task data for creation
pub fn validate_task_create(data: &TaskCreateInput, today: NaiveDate) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if data.title.trim().is_empty() {
        errors.push(ValidationError::new("title", "Task title is required"));
    }
    if data.project_id.trim().is_empty() {
        errors.push(ValidationError::new("projectId", "Project is required"));
    }
    if data.assigned_to.trim().is_empty() {
        errors.push(ValidationError::new("assignedTo", "Assignee is required"));
    }
    check_estimated_hours(data.estimated_hours, &mut errors);
    check_future_deadline(data.deadline, today, &mut errors);
    check_tags(&data.tags, &mut errors);

    errors
}

/// Validates task update data
pub fn validate_task_update(data: &TaskUpdateInput, today: NaiveDate) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(ref title) = data.title {
        if title.trim().is_empty() {
            errors.push(ValidationError::new("title", "Task title cannot be empty"));
        }
    }
    if let Some(ref assigned_to) = data.assigned_to {
        if assigned_to.trim().is_empty() {
            errors.push(ValidationError::new("assignedTo", "Assignee cannot be empty"));
        }
    }
    check_estimated_hours(data.estimated_hours, &mut errors);
    check_future_deadline(data.deadline, today, &mut errors);
    if let Some(ref tags) = data.tags {
        check_tags(tags, &mut errors);
    }

    errors
}

/// Validates project data for creation
pub fn validate_project_create(
    data: &ProjectCreateInput,
    today: NaiveDate,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if data.name.trim().is_empty() {
        errors.push(ValidationError::new("name", "Project name is required"));
    }
    check_future_deadline(data.deadline, today, &mut errors);

    errors
}

/// Validates team data for creation
pub fn validate_team_create(data: &TeamCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if data.name.trim().is_empty() {
        errors.push(ValidationError::new("name", "Team name is required"));
    }

    errors
}

/// Validates project part data
pub fn validate_part(data: &PartCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if data.name.trim().is_empty() {
        errors.push(ValidationError::new("name", "Part name is required"));
    }
    if !(1..=100).contains(&data.weight) {
        errors.push(ValidationError::new(
            "weight",
            "Weight must be between 1 and 100",
        ));
    }

    errors
}
