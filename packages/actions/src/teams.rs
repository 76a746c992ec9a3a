// ABOUTME: Team actions, including roster membership

use crate::dispatcher::{ActionError, ActionResult, Dispatcher};
use crewboard_core::{
    validate_team_create, EntityId, Team, TeamCreateInput, TeamUpdateInput,
};
use crewboard_store::Mutation;

impl Dispatcher {
    pub async fn create_team(&self, input: TeamCreateInput) -> ActionResult<Team> {
        let errors = validate_team_create(&input);
        if !errors.is_empty() {
            return Err(ActionError::Validation(errors));
        }

        self.run(
            async {
                let team = self.gateway().create_team(&input).await?;
                self.dispatch(Mutation::AddTeam(team.clone()));
                Ok(team)
            },
            ("Success", "Team created"),
            ("Error", "Failed to create team"),
        )
        .await
    }

    pub async fn update_team(&self, id: &EntityId, input: TeamUpdateInput) -> ActionResult<Team> {
        self.run(
            async {
                let team = self.gateway().update_team(id, &input).await?;
                self.dispatch(Mutation::UpdateTeam(team.clone()));
                Ok(team)
            },
            ("Success", "Team updated"),
            ("Error", "Failed to update team"),
        )
        .await
    }

    pub async fn delete_team(&self, id: &EntityId) -> ActionResult<()> {
        self.run(
            async {
                self.gateway().delete_team(id).await?;
                self.dispatch(Mutation::DeleteTeam(id.clone()));
                Ok(())
            },
            ("Success", "Team deleted"),
            ("Error", "Failed to delete team"),
        )
        .await
    }

    /// Add a member to a team's roster
    pub async fn add_team_member(
        &self,
        team_id: &EntityId,
        member_id: &EntityId,
    ) -> ActionResult<()> {
        let team = match self.store().read(|s| s.team(team_id).cloned()) {
            Some(team) => team,
            None => {
                return self.fail_fast(
                    ActionError::MissingEntity(format!("team {}", team_id)),
                    ("Error", "Failed to update team"),
                )
            }
        };

        self.run(
            async {
                self.gateway().add_team_member(team_id, member_id).await?;
                let mut updated = team;
                if !updated.members.contains(member_id) {
                    updated.members.push(member_id.clone());
                }
                self.dispatch(Mutation::UpdateTeam(updated));
                Ok(())
            },
            ("Success", "Member added to team"),
            ("Error", "Failed to update team"),
        )
        .await
    }

    /// Remove a member from a team's roster
    pub async fn remove_team_member(
        &self,
        team_id: &EntityId,
        member_id: &EntityId,
    ) -> ActionResult<()> {
        let team = match self.store().read(|s| s.team(team_id).cloned()) {
            Some(team) => team,
            None => {
                return self.fail_fast(
                    ActionError::MissingEntity(format!("team {}", team_id)),
                    ("Error", "Failed to update team"),
                )
            }
        };

        self.run(
            async {
                self.gateway().remove_team_member(team_id, member_id).await?;
                let mut updated = team;
                updated.members.retain(|id| id != member_id);
                self.dispatch(Mutation::UpdateTeam(updated));
                Ok(())
            },
            ("Success", "Member removed from team"),
            ("Error", "Failed to update team"),
        )
        .await
    }
}
