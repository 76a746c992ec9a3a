// ABOUTME: Watch mode: initial load, change-feed subscriptions, and live snapshot summaries

use colored::Colorize;
use crewboard_actions::Dispatcher;
use crewboard_gateway::Gateway;
use crewboard_realtime::ChangeListener;
use crewboard_store::{Mutation, Store};
use std::sync::Arc;

pub async fn handle(
    dispatcher: &Dispatcher,
    store: Arc<Store>,
    gateway: Arc<Gateway>,
) -> anyhow::Result<()> {
    dispatcher.load_all().await?;
    print_summary(&store);

    let mut revisions = store.subscribe();
    let listener = ChangeListener::spawn(store.clone(), gateway);

    println!("{}", "Watching for changes (ctrl-c to stop)...".dimmed());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = revisions.changed() => {
                if changed.is_err() {
                    break;
                }
                print_summary(&store);
            }
        }
    }

    store.dispatch(Mutation::SetConnected(false));
    drop(listener);
    println!("{}", "Stopped".dimmed());
    Ok(())
}

fn print_summary(store: &Store) {
    let snapshot = store.snapshot();
    println!(
        "{} projects: {}  teams: {}  members: {}  tasks: {}",
        chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
        snapshot.projects.len(),
        snapshot.teams.len(),
        snapshot.members.len(),
        snapshot.tasks.len(),
    );
    if let Some(notification) = snapshot.notifications.last() {
        println!(
            "  {} {}: {}",
            format!("[{}]", notification.severity).yellow(),
            notification.title,
            notification.message
        );
    }
}
