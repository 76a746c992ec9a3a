// ABOUTME: Dispatcher struct and the shared action lifecycle
// ABOUTME: Idle -> Pending (loading) -> Success (mutation + toast) | Failed (toast + re-throw) -> Idle

use crewboard_core::{Notification, ValidationError};
use crewboard_gateway::{Gateway, GatewayError};
use crewboard_store::{Mutation, Store};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Action layer errors
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Validation errors: {0:?}")]
    Validation(Vec<ValidationError>),
    #[error("No manager found to assign to the project")]
    NoManagerAvailable,
    #[error("Not present in the store: {0}")]
    MissingEntity(String),
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

pub type ActionResult<T> = Result<T, ActionError>;

/// Orchestrates gateway round trips and store mutations
///
/// Construct one per application next to the store; both handles are
/// cheap to clone and share. Failed actions never partially apply: the
/// store only changes after the gateway round trip succeeds.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<Store>,
    gateway: Arc<Gateway>,
}

impl Dispatcher {
    pub fn new(store: Arc<Store>, gateway: Arc<Gateway>) -> Self {
        Dispatcher { store, gateway }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub(crate) fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub(crate) fn dispatch(&self, mutation: Mutation) {
        self.store.dispatch(mutation);
    }

    /// Run one remote operation under the loading flag, with the
    /// standard notification policy: success toast on Ok, generic error
    /// toast plus re-thrown error on Err. No retry is attempted.
    pub(crate) async fn run<T, F>(
        &self,
        op: F,
        success: (&str, &str),
        failure: (&str, &str),
    ) -> ActionResult<T>
    where
        F: Future<Output = ActionResult<T>>,
    {
        self.dispatch(Mutation::SetLoading(true));
        let result = op.await;
        self.dispatch(Mutation::SetLoading(false));

        match &result {
            Ok(_) => {
                self.dispatch(Mutation::SetError(None));
                self.dispatch(Mutation::AddNotification(Notification::success(
                    success.0, success.1,
                )));
            }
            Err(err) => {
                warn!(error = %err, "action failed");
                self.dispatch(Mutation::SetError(Some(err.to_string())));
                self.dispatch(Mutation::AddNotification(Notification::error(
                    failure.0, failure.1,
                )));
            }
        }
        result
    }

    /// Fail a precondition before any network round trip
    pub(crate) fn fail_fast<T>(&self, err: ActionError, failure: (&str, &str)) -> ActionResult<T> {
        warn!(error = %err, "action precondition failed");
        self.dispatch(Mutation::SetError(Some(err.to_string())));
        self.dispatch(Mutation::AddNotification(Notification::error(
            failure.0, failure.1,
        )));
        Err(err)
    }

    /// Fetch every collection and replace the store wholesale
    ///
    /// Used for the initial load and marks the session connected once
    /// all four lists land.
    pub async fn load_all(&self) -> ActionResult<()> {
        self.dispatch(Mutation::SetLoading(true));

        let result = async {
            let members = self.gateway.list_users().await?;
            let projects = self.gateway.list_projects().await?;
            let teams = self.gateway.list_teams().await?;
            let tasks = self.gateway.list_tasks().await?;
            Ok::<_, ActionError>((members, projects, teams, tasks))
        }
        .await;

        self.dispatch(Mutation::SetLoading(false));

        match result {
            Ok((members, projects, teams, tasks)) => {
                info!(
                    members = members.len(),
                    projects = projects.len(),
                    teams = teams.len(),
                    tasks = tasks.len(),
                    "initial load complete"
                );
                self.dispatch(Mutation::SetMembers(members));
                self.dispatch(Mutation::SetProjects(projects));
                self.dispatch(Mutation::SetTeams(teams));
                self.dispatch(Mutation::SetTasks(tasks));
                self.dispatch(Mutation::SetConnected(true));
                self.dispatch(Mutation::SetError(None));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "initial load failed");
                self.dispatch(Mutation::SetConnected(false));
                self.dispatch(Mutation::SetError(Some(err.to_string())));
                self.dispatch(Mutation::AddNotification(Notification::error(
                    "Connection failed",
                    "Could not load data from the backend",
                )));
                Err(err)
            }
        }
    }

    /// Dismiss a notification by id
    pub fn remove_notification(&self, id: i64) {
        self.dispatch(Mutation::RemoveNotification(id));
    }
}
