// ABOUTME: Project subcommands: CRUD plus parts and part todos

use super::{date_cell, parse_date, parse_wire_enum, styled_table};
use clap::Subcommand;
use colored::Colorize;
use crewboard_actions::Dispatcher;
use crewboard_core::{
    PartCreateInput, ProjectCreateInput, ProjectStatus, ProjectUpdateInput,
};

#[derive(Subcommand)]
pub enum ProjectsCommands {
    /// List all projects
    List,
    /// Show one project with its parts and activity log
    Show {
        /// Project id
        id: String,
    },
    /// Create a new project
    Add {
        /// Project name
        #[arg(short, long)]
        name: String,
        /// Project description
        #[arg(short, long)]
        description: Option<String>,
        /// Manager member id (resolved from the roster when omitted)
        #[arg(short, long)]
        manager: Option<String>,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
    },
    /// Update an existing project
    Update {
        /// Project id
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
        /// Progress percentage
        #[arg(long)]
        progress: Option<u8>,
        /// Status: active, completed, on-hold, pending
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a project
    Delete {
        /// Project id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Add a weighted part to a project
    AddPart {
        /// Parent project id
        project: String,
        /// Part name
        #[arg(short, long)]
        name: String,
        /// Percentage contribution to project progress (1-100)
        #[arg(short, long)]
        weight: u8,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Add a checklist todo to a project part
    AddTodo {
        /// Parent project id
        project: String,
        /// Part id
        part: String,
        /// Todo text
        text: String,
    },
    /// Toggle a part todo between done and not-done
    ToggleTodo {
        /// Parent project id
        project: String,
        /// Part id
        part: String,
        /// Todo id
        todo: String,
    },
}

pub async fn handle(dispatcher: &Dispatcher, command: ProjectsCommands) -> anyhow::Result<()> {
    dispatcher.load_all().await?;

    match command {
        ProjectsCommands::List => list(dispatcher),
        ProjectsCommands::Show { id } => show(dispatcher, &id),
        ProjectsCommands::Add {
            name,
            description,
            manager,
            deadline,
        } => {
            let input = ProjectCreateInput {
                name,
                description,
                manager_id: manager,
                deadline: deadline.as_deref().map(parse_date).transpose()?,
            };
            let project = dispatcher.create_project(input).await?;
            println!("{} {} ({})", "Created project".green(), project.name, project.id);
            Ok(())
        }
        ProjectsCommands::Update {
            id,
            name,
            description,
            deadline,
            progress,
            status,
        } => {
            let status = status
                .as_deref()
                .map(|s| parse_wire_enum::<ProjectStatus>("project status", s))
                .transpose()?;
            let input = ProjectUpdateInput {
                name,
                description,
                manager_id: None,
                deadline: deadline.as_deref().map(parse_date).transpose()?,
                progress,
                status,
            };
            let project = dispatcher.update_project(&id, input).await?;
            println!("{} {} ({})", "Updated project".green(), project.name, project.id);
            Ok(())
        }
        ProjectsCommands::Delete { id, yes } => {
            if !super::confirm_delete(&format!("project {}", id), yes)? {
                return Ok(());
            }
            dispatcher.delete_project(&id).await?;
            println!("{} {}", "Deleted project".green(), id);
            Ok(())
        }
        ProjectsCommands::AddPart {
            project,
            name,
            weight,
            description,
        } => {
            let part = dispatcher
                .add_part(
                    &project,
                    PartCreateInput {
                        name,
                        description,
                        weight,
                        progress: None,
                    },
                )
                .await?;
            println!("{} {} ({})", "Added part".green(), part.name, part.id);
            Ok(())
        }
        ProjectsCommands::AddTodo {
            project,
            part,
            text,
        } => {
            let todo = dispatcher.add_part_todo(&project, &part, &text).await?;
            println!("{} {} ({})", "Added todo".green(), todo.text, todo.id);
            Ok(())
        }
        ProjectsCommands::ToggleTodo {
            project,
            part,
            todo,
        } => {
            let todo = dispatcher.toggle_part_todo(&project, &part, &todo).await?;
            let state = if todo.completed { "done" } else { "open" };
            println!("{} {} ({})", "Todo now".green(), state, todo.id);
            Ok(())
        }
    }
}

fn list(dispatcher: &Dispatcher) -> anyhow::Result<()> {
    let snapshot = dispatcher.store().snapshot();

    if snapshot.projects.is_empty() {
        println!("{}", "No projects found".yellow());
        return Ok(());
    }

    let mut table = styled_table(vec![
        "ID", "Name", "Manager", "Status", "Progress", "Teams", "Deadline",
    ]);
    for project in &snapshot.projects {
        table.add_row(vec![
            project.id.clone(),
            project.name.clone(),
            project.manager.clone(),
            project.status.to_string(),
            format!("{}%", project.progress),
            project.teams.len().to_string(),
            date_cell(&project.deadline),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn show(dispatcher: &Dispatcher, id: &str) -> anyhow::Result<()> {
    let snapshot = dispatcher.store().snapshot();
    let project = snapshot
        .project(id)
        .ok_or_else(|| anyhow::anyhow!("no project with id {}", id))?;

    println!("{} {}", project.name.bold(), format!("({})", project.id).dimmed());
    if let Some(ref description) = project.description {
        println!("{}", description);
    }
    println!(
        "manager: {}  status: {}  progress: {}%  deadline: {}",
        project.manager,
        project.status,
        project.progress,
        date_cell(&project.deadline)
    );

    if !project.parts.is_empty() {
        let mut table = styled_table(vec!["Part", "Weight", "Progress", "Todos"]);
        for part in &project.parts {
            let done = part.todos.iter().filter(|t| t.completed).count();
            table.add_row(vec![
                part.name.clone(),
                format!("{}%", part.weight),
                format!("{}%", part.progress),
                format!("{}/{}", done, part.todos.len()),
            ]);
        }
        println!("{table}");
    }

    for entry in &project.activity_log {
        println!("{} {}", entry.date.to_string().dimmed(), entry.message);
    }
    Ok(())
}
