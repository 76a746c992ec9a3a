// ABOUTME: Change-notification listener for the Crewboard backend
// ABOUTME: Any event on a table's channel discards the payload and refetches the whole collection

use crewboard_gateway::Gateway;
use crewboard_store::{Mutation, Store};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Delay before re-opening a dropped change-feed connection
const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// The tables whose row-level changes invalidate a store collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchedTable {
    Projects,
    Teams,
    Users,
    Tasks,
}

impl WatchedTable {
    pub const ALL: [WatchedTable; 4] = [
        WatchedTable::Projects,
        WatchedTable::Teams,
        WatchedTable::Users,
        WatchedTable::Tasks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WatchedTable::Projects => "projects",
            WatchedTable::Teams => "teams",
            WatchedTable::Users => "users",
            WatchedTable::Tasks => "tasks",
        }
    }
}

/// Re-issue the full-collection list for one table and replace it wholesale
///
/// Runs outside the action layer on purpose: background refetches raise
/// no notifications and do not touch the loading flag.
async fn refetch(store: &Store, gateway: &Gateway, table: WatchedTable) {
    let result = match table {
        WatchedTable::Projects => gateway.list_projects().await.map(Mutation::SetProjects),
        WatchedTable::Teams => gateway.list_teams().await.map(Mutation::SetTeams),
        WatchedTable::Users => gateway.list_users().await.map(Mutation::SetMembers),
        WatchedTable::Tasks => gateway.list_tasks().await.map(Mutation::SetTasks),
    };

    match result {
        Ok(mutation) => {
            debug!(table = table.as_str(), "refetched collection after change event");
            store.dispatch(mutation);
        }
        // A failed refetch leaves the previous snapshot in place; the
        // next change event will try again
        Err(err) => warn!(table = table.as_str(), error = %err, "refetch failed"),
    }
}

/// Consume one change-feed connection until it ends or the store disconnects
async fn pump_feed(store: &Store, gateway: &Gateway, table: WatchedTable) {
    let response = match gateway.open_change_feed(table.as_str()).await {
        Ok(response) => response,
        Err(err) => {
            warn!(table = table.as_str(), error = %err, "change feed connect failed");
            return;
        }
    };

    info!(table = table.as_str(), "change feed connected");
    let mut stream = response.bytes_stream();
    let mut buffer = String::new();

    while let Some(chunk) = stream.next().await {
        if !store.is_connected() {
            return;
        }
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(err) => {
                warn!(table = table.as_str(), error = %err, "change feed read failed");
                return;
            }
        };

        buffer.push_str(&String::from_utf8_lossy(&chunk));
        while let Some(newline) = buffer.find('\n') {
            let line = buffer[..newline].trim().to_string();
            buffer.drain(..=newline);
            // The payload itself is opaque; seeing any data line is
            // enough to invalidate the collection
            if line.starts_with("data:") {
                refetch(store, gateway, table).await;
            }
        }
    }
}

/// Handle over the spawned per-table listener tasks
///
/// Subscriptions run while the store's connected flag is set and are
/// torn down when it transitions to false or the handle is dropped.
/// In-flight refetches are not cancelled; a late response applies in
/// arrival order.
pub struct ChangeListener {
    handles: Vec<JoinHandle<()>>,
}

impl ChangeListener {
    pub fn spawn(store: Arc<Store>, gateway: Arc<Gateway>) -> Self {
        let handles = WatchedTable::ALL
            .iter()
            .map(|&table| {
                let store = store.clone();
                let gateway = gateway.clone();
                tokio::spawn(async move {
                    while store.is_connected() {
                        pump_feed(&store, &gateway, table).await;
                        if !store.is_connected() {
                            break;
                        }
                        tokio::time::sleep(RECONNECT_DELAY).await;
                    }
                    info!(table = table.as_str(), "change feed stopped");
                })
            })
            .collect();

        Self { handles }
    }

    /// Abort all subscription tasks immediately
    pub fn stop(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for ChangeListener {
    fn drop(&mut self) {
        self.stop();
    }
}
