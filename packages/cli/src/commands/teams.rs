// ABOUTME: Team subcommands: CRUD plus roster membership

use super::{date_cell, parse_date, styled_table};
use clap::Subcommand;
use colored::Colorize;
use crewboard_actions::Dispatcher;
use crewboard_core::{TeamCreateInput, TeamUpdateInput};

#[derive(Subcommand)]
pub enum TeamsCommands {
    /// List all teams
    List,
    /// Create a new team
    Add {
        /// Team name
        #[arg(short, long)]
        name: String,
        /// Lead member id
        #[arg(short, long)]
        lead: Option<String>,
        /// Parent project id
        #[arg(short, long)]
        project: Option<String>,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
    },
    /// Update an existing team
    Update {
        /// Team id
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        /// Lead member id
        #[arg(short, long)]
        lead: Option<String>,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
        /// Progress percentage
        #[arg(long)]
        progress: Option<u8>,
    },
    /// Delete a team
    Delete {
        /// Team id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Add a member to the roster
    AddMember {
        /// Team id
        team: String,
        /// Member id
        member: String,
    },
    /// Remove a member from the roster
    RemoveMember {
        /// Team id
        team: String,
        /// Member id
        member: String,
    },
}

pub async fn handle(dispatcher: &Dispatcher, command: TeamsCommands) -> anyhow::Result<()> {
    dispatcher.load_all().await?;

    match command {
        TeamsCommands::List => list(dispatcher),
        TeamsCommands::Add {
            name,
            lead,
            project,
            deadline,
        } => {
            let input = TeamCreateInput {
                name,
                lead_id: lead,
                project_id: project,
                deadline: deadline.as_deref().map(parse_date).transpose()?,
            };
            let team = dispatcher.create_team(input).await?;
            println!("{} {} ({})", "Created team".green(), team.name, team.id);
            Ok(())
        }
        TeamsCommands::Update {
            id,
            name,
            lead,
            deadline,
            progress,
        } => {
            let input = TeamUpdateInput {
                name,
                lead_id: lead,
                project_id: None,
                deadline: deadline.as_deref().map(parse_date).transpose()?,
                progress,
            };
            let team = dispatcher.update_team(&id, input).await?;
            println!("{} {} ({})", "Updated team".green(), team.name, team.id);
            Ok(())
        }
        TeamsCommands::Delete { id, yes } => {
            if !super::confirm_delete(&format!("team {}", id), yes)? {
                return Ok(());
            }
            dispatcher.delete_team(&id).await?;
            println!("{} {}", "Deleted team".green(), id);
            Ok(())
        }
        TeamsCommands::AddMember { team, member } => {
            dispatcher.add_team_member(&team, &member).await?;
            println!("{} {} -> {}", "Added member".green(), member, team);
            Ok(())
        }
        TeamsCommands::RemoveMember { team, member } => {
            dispatcher.remove_team_member(&team, &member).await?;
            println!("{} {} from {}", "Removed member".green(), member, team);
            Ok(())
        }
    }
}

fn list(dispatcher: &Dispatcher) -> anyhow::Result<()> {
    let snapshot = dispatcher.store().snapshot();

    if snapshot.teams.is_empty() {
        println!("{}", "No teams found".yellow());
        return Ok(());
    }

    let mut table = styled_table(vec!["ID", "Name", "Lead", "Members", "Progress", "Deadline"]);
    for team in &snapshot.teams {
        table.add_row(vec![
            team.id.clone(),
            team.name.clone(),
            team.lead.clone(),
            team.members.len().to_string(),
            format!("{}%", team.progress),
            date_cell(&team.deadline),
        ]);
    }
    println!("{table}");
    Ok(())
}
