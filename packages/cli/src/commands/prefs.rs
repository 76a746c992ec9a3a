// ABOUTME: Preference subcommands over the persisted theme/language/role strings

use clap::Subcommand;
use colored::Colorize;
use crewboard_core::Role;
use crewboard_settings::Preferences;

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Show the persisted preferences
    Show,
    /// Change one or more preferences
    Set {
        /// Theme: light or dark
        #[arg(long)]
        theme: Option<String>,
        /// Language code, e.g. en or tr
        #[arg(long)]
        language: Option<String>,
        /// Role: manager, teamLead, member
        #[arg(long)]
        role: Option<String>,
    },
}

/// Parse the persisted role string into a Role
pub fn parse_role(value: &str) -> Option<Role> {
    super::parse_wire_enum::<Role>("role", value).ok()
}

pub fn handle(command: PrefsCommands) -> anyhow::Result<()> {
    match command {
        PrefsCommands::Show => {
            let prefs = Preferences::load();
            println!("theme:    {}", prefs.theme);
            println!("language: {}", prefs.language);
            println!("role:     {}", prefs.role);
            Ok(())
        }
        PrefsCommands::Set {
            theme,
            language,
            role,
        } => {
            let mut prefs = Preferences::load();
            if let Some(theme) = theme {
                if theme != "light" && theme != "dark" {
                    anyhow::bail!("'{}' is not a valid theme (light, dark)", theme);
                }
                prefs.theme = theme;
            }
            if let Some(language) = language {
                prefs.language = language;
            }
            if let Some(role) = role {
                if parse_role(&role).is_none() {
                    anyhow::bail!("'{}' is not a valid role (manager, teamLead, member)", role);
                }
                prefs.role = role;
            }
            prefs.save()?;
            println!("{}", "Preferences saved".green());
            Ok(())
        }
    }
}
