// ABOUTME: Member subcommands: CRUD plus the personal todo list

use super::{parse_wire_enum, styled_table};
use clap::Subcommand;
use colored::Colorize;
use crewboard_actions::Dispatcher;
use crewboard_core::{MemberCreateInput, MemberUpdateInput, Role};

#[derive(Subcommand)]
pub enum MembersCommands {
    /// List all members
    List,
    /// Create a new member
    Add {
        /// Member name
        #[arg(short, long)]
        name: String,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Role: manager, teamLead, member
        #[arg(short, long, default_value = "member")]
        role: String,
        /// Team id to join
        #[arg(short, long)]
        team: Option<String>,
    },
    /// Update an existing member
    Update {
        /// Member id
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        /// Role: manager, teamLead, member
        #[arg(short, long)]
        role: Option<String>,
        /// Team id
        #[arg(short, long)]
        team: Option<String>,
    },
    /// Delete a member
    Delete {
        /// Member id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Add a personal todo
    AddTodo {
        /// Member id
        member: String,
        /// Todo text
        text: String,
    },
    /// Toggle a personal todo between done and not-done
    ToggleTodo {
        /// Member id
        member: String,
        /// Todo id
        todo: String,
    },
    /// Delete a personal todo
    DeleteTodo {
        /// Member id
        member: String,
        /// Todo id
        todo: String,
    },
}

pub async fn handle(dispatcher: &Dispatcher, command: MembersCommands) -> anyhow::Result<()> {
    dispatcher.load_all().await?;

    match command {
        MembersCommands::List => list(dispatcher),
        MembersCommands::Add {
            name,
            email,
            role,
            team,
        } => {
            let input = MemberCreateInput {
                name,
                email,
                role: parse_wire_enum::<Role>("role", &role)?,
                team_id: team,
            };
            let member = dispatcher.create_member(input).await?;
            println!("{} {} ({})", "Created member".green(), member.name, member.id);
            Ok(())
        }
        MembersCommands::Update {
            id,
            name,
            email,
            role,
            team,
        } => {
            let input = MemberUpdateInput {
                name,
                email,
                role: role
                    .as_deref()
                    .map(|r| parse_wire_enum::<Role>("role", r))
                    .transpose()?,
                team_id: team,
            };
            let member = dispatcher.update_member(&id, input).await?;
            println!("{} {} ({})", "Updated member".green(), member.name, member.id);
            Ok(())
        }
        MembersCommands::Delete { id, yes } => {
            if !super::confirm_delete(&format!("member {}", id), yes)? {
                return Ok(());
            }
            dispatcher.delete_member(&id).await?;
            println!("{} {}", "Deleted member".green(), id);
            Ok(())
        }
        MembersCommands::AddTodo { member, text } => {
            let todo = dispatcher.add_personal_todo(&member, &text).await?;
            println!("{} {} ({})", "Added todo".green(), todo.text, todo.id);
            Ok(())
        }
        MembersCommands::ToggleTodo { member, todo } => {
            let todo = dispatcher.toggle_personal_todo(&member, &todo).await?;
            let state = if todo.completed { "done" } else { "open" };
            println!("{} {} ({})", "Todo now".green(), state, todo.id);
            Ok(())
        }
        MembersCommands::DeleteTodo { member, todo } => {
            dispatcher.delete_personal_todo(&member, &todo).await?;
            println!("{} {}", "Deleted todo".green(), todo);
            Ok(())
        }
    }
}

fn list(dispatcher: &Dispatcher) -> anyhow::Result<()> {
    let snapshot = dispatcher.store().snapshot();

    if snapshot.members.is_empty() {
        println!("{}", "No members found".yellow());
        return Ok(());
    }

    let mut table = styled_table(vec!["ID", "Name", "Role", "Team", "Tasks", "Todos"]);
    for member in &snapshot.members {
        let open_todos = member
            .personal_todos
            .iter()
            .filter(|t| !t.completed)
            .count();
        table.add_row(vec![
            member.id.clone(),
            member.name.clone(),
            member.role.to_string(),
            member.team_id.clone().unwrap_or_else(|| "—".to_string()),
            member.tasks.len().to_string(),
            format!("{} open", open_todos),
        ]);
    }
    println!("{table}");
    Ok(())
}
