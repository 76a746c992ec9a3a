// ABOUTME: Task subcommands: CRUD, assignment, progress, and comments

use super::{date_cell, parse_date, parse_wire_enum, styled_table};
use clap::Subcommand;
use colored::Colorize;
use crewboard_actions::Dispatcher;
use crewboard_core::{TaskCategory, TaskCreateInput, TaskPriority};

#[derive(Subcommand)]
pub enum TasksCommands {
    /// List all tasks
    List,
    /// Create a new task
    Add {
        /// Task title
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Parent project id
        #[arg(short, long)]
        project: String,
        /// Parent project part id
        #[arg(long)]
        part: Option<String>,
        /// Assignee member id
        #[arg(long)]
        to: String,
        /// Assigning member id
        #[arg(long)]
        by: String,
        /// Priority: low, medium, high, urgent
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Category: development, design, testing, documentation, meeting, review, general
        #[arg(long, default_value = "general")]
        category: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
        /// Estimated hours (1-200)
        #[arg(long)]
        hours: Option<u32>,
        /// Free-text tags
        #[arg(long)]
        tag: Vec<String>,
    },
    /// Reassign a task to another member
    Assign {
        /// Task id
        id: String,
        /// New assignee member id
        #[arg(long)]
        to: String,
        /// Acting member id, recorded in the task history
        #[arg(long)]
        actor: String,
    },
    /// Update a task's progress percentage
    Progress {
        /// Task id
        id: String,
        /// New progress value (steps of 25, clamped to 0-100)
        value: i64,
        /// Acting member id, recorded in the task history
        #[arg(long)]
        actor: String,
    },
    /// Delete a task
    Delete {
        /// Task id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List the comments on a task
    Comments {
        /// Task id
        id: String,
    },
    /// Comment on a task
    Comment {
        /// Task id
        id: String,
        /// Comment text
        text: String,
        /// Commenting member id
        #[arg(long)]
        actor: String,
    },
}

pub async fn handle(dispatcher: &Dispatcher, command: TasksCommands) -> anyhow::Result<()> {
    dispatcher.load_all().await?;

    match command {
        TasksCommands::List => list(dispatcher),
        TasksCommands::Add {
            title,
            description,
            project,
            part,
            to,
            by,
            priority,
            category,
            deadline,
            hours,
            tag,
        } => {
            let input = TaskCreateInput {
                title,
                description,
                project_id: project,
                project_part_id: part,
                assigned_to: to,
                assigned_by: by,
                priority: parse_wire_enum::<TaskPriority>("priority", &priority)?,
                category: parse_wire_enum::<TaskCategory>("category", &category)?,
                deadline: deadline.as_deref().map(parse_date).transpose()?,
                estimated_hours: hours,
                tags: tag,
            };
            let task = dispatcher.create_task(input).await?;
            println!("{} {} ({})", "Created task".green(), task.title, task.id);
            Ok(())
        }
        TasksCommands::Assign { id, to, actor } => {
            let task = dispatcher.assign_task(&id, &to, &actor).await?;
            println!("{} {} -> {}", "Assigned".green(), task.title, task.assigned_to);
            Ok(())
        }
        TasksCommands::Progress { id, value, actor } => {
            let task = dispatcher.update_task_progress(&id, value, &actor).await?;
            println!("{} {} at {}%", "Progress".green(), task.title, task.progress);
            Ok(())
        }
        TasksCommands::Delete { id, yes } => {
            if !super::confirm_delete(&format!("task {}", id), yes)? {
                return Ok(());
            }
            dispatcher.delete_task(&id).await?;
            println!("{} {}", "Deleted task".green(), id);
            Ok(())
        }
        TasksCommands::Comments { id } => {
            let comments = dispatcher.list_task_comments(&id).await?;
            if comments.is_empty() {
                println!("{}", "No comments".yellow());
                return Ok(());
            }
            for comment in comments {
                println!(
                    "{} {} {}",
                    comment.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                    comment.user_id.bold(),
                    comment.comment
                );
            }
            Ok(())
        }
        TasksCommands::Comment { id, text, actor } => {
            let comment = dispatcher.comment_on_task(&id, &actor, &text).await?;
            println!("{} ({})", "Comment added".green(), comment.id);
            Ok(())
        }
    }
}

fn list(dispatcher: &Dispatcher) -> anyhow::Result<()> {
    let snapshot = dispatcher.store().snapshot();

    if snapshot.tasks.is_empty() {
        println!("{}", "No tasks found".yellow());
        return Ok(());
    }

    let mut table = styled_table(vec![
        "ID", "Title", "Assignee", "Priority", "Category", "Status", "Progress", "Deadline",
    ]);
    for task in &snapshot.tasks {
        let assignee = snapshot
            .member(&task.assigned_to)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| task.assigned_to.clone());
        table.add_row(vec![
            task.id.clone(),
            task.title.clone(),
            assignee,
            task.priority.to_string(),
            task.category.to_string(),
            task.status.to_string(),
            format!("{}%", task.progress),
            date_cell(&task.deadline),
        ]);
    }
    println!("{table}");
    Ok(())
}
