use uuid::Uuid;

use super::{CoachApi, Method};
use crate::error::ApiError;
use crate::model::team::{Team, TeamCreate, TeamWithMembers};

impl CoachApi {
    pub fn list_teams(&self) -> Result<Vec<Team>, ApiError> {
        self.get("/teams")
    }

    pub fn create_team(&self, team: &TeamCreate) -> Result<Team, ApiError> {
        self.send(Method::Post, "/teams", team)
    }

    pub fn get_team(&self, team_id: Uuid) -> Result<TeamWithMembers, ApiError> {
        self.get(&format!("/teams/{}", team_id))
    }

    pub fn delete_team(&self, team_id: Uuid) -> Result<(), ApiError> {
        self.remove(&format!("/teams/{}", team_id))
    }
}
