// ABOUTME: Subcommand handlers for the crewboard binary

pub mod members;
pub mod prefs;
pub mod projects;
pub mod tasks;
pub mod teams;
pub mod watch;

use chrono::NaiveDate;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use serde::de::DeserializeOwned;

/// Parse a YYYY-MM-DD argument
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("expected a date in YYYY-MM-DD form, got '{}'", value))
}

/// Parse an enum argument by its wire name (e.g. "in_progress", "teamLead")
pub fn parse_wire_enum<T: DeserializeOwned>(kind: &str, value: &str) -> anyhow::Result<T> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| anyhow::anyhow!("'{}' is not a valid {}", value, kind))
}

/// Standard table styling shared by the list commands
pub fn styled_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers);
    table
}

/// Render an optional date cell
pub fn date_cell(date: &Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "—".to_string())
}

/// Ask before a destructive command unless --yes was given
pub fn confirm_delete(what: &str, skip: bool) -> anyhow::Result<bool> {
    if skip {
        return Ok(true);
    }
    Ok(inquire::Confirm::new(&format!("Delete {}?", what))
        .with_default(false)
        .prompt()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewboard_core::{Role, TaskStatus};

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2026-09-30").is_ok());
        assert!(parse_date("30/09/2026").is_err());
    }

    #[test]
    fn test_parse_wire_enum_names() {
        let role: Role = parse_wire_enum("role", "teamLead").unwrap();
        assert_eq!(role, Role::TeamLead);
        let status: TaskStatus = parse_wire_enum("status", "in_progress").unwrap();
        assert_eq!(status, TaskStatus::InProgress);
        assert!(parse_wire_enum::<Role>("role", "boss").is_err());
    }
}
