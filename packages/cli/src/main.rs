// ABOUTME: Entry point for the crewboard binary
// ABOUTME: Thin view layer over the store, action, and realtime packages

use clap::{Parser, Subcommand};
use colored::Colorize;
use crewboard_actions::Dispatcher;
use crewboard_core::Role;
use crewboard_gateway::Gateway;
use crewboard_settings::Preferences;
use crewboard_store::{AppState, Store};
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::members::MembersCommands;
use commands::prefs::PrefsCommands;
use commands::projects::ProjectsCommands;
use commands::tasks::TasksCommands;
use commands::teams::TeamsCommands;
use config::Config;

#[derive(Parser)]
#[command(name = "crewboard")]
#[command(about = "Crewboard - role-based project management from the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage projects and their parts
    #[command(subcommand)]
    Projects(ProjectsCommands),
    /// Manage teams and rosters
    #[command(subcommand)]
    Teams(TeamsCommands),
    /// Manage members and personal todos
    #[command(subcommand)]
    Members(MembersCommands),
    /// Manage tasks
    #[command(subcommand)]
    Tasks(TasksCommands),
    /// Follow backend change notifications and print snapshot updates
    Watch,
    /// Show or change persisted preferences
    #[command(subcommand)]
    Prefs(PrefsCommands),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), err);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        // Preferences work offline; everything else needs the backend
        Commands::Prefs(cmd) => commands::prefs::handle(cmd),
        command => {
            let config = Config::from_env()?;
            let prefs = Preferences::load();
            let role = commands::prefs::parse_role(&prefs.role).unwrap_or(Role::Manager);

            let store = Arc::new(Store::new(AppState::new(prefs.theme, prefs.language, role)));
            let mut gateway = Gateway::new(config.backend_url, config.api_key)?;
            if let Some(token) = config.service_token {
                gateway.set_access_token(token);
            }
            let gateway = Arc::new(gateway);
            let dispatcher = Dispatcher::new(store.clone(), gateway.clone());

            match command {
                Commands::Projects(cmd) => commands::projects::handle(&dispatcher, cmd).await,
                Commands::Teams(cmd) => commands::teams::handle(&dispatcher, cmd).await,
                Commands::Members(cmd) => commands::members::handle(&dispatcher, cmd).await,
                Commands::Tasks(cmd) => commands::tasks::handle(&dispatcher, cmd).await,
                Commands::Watch => commands::watch::handle(&dispatcher, store, gateway).await,
                Commands::Prefs(_) => unreachable!("handled above"),
            }
        }
    }
}
