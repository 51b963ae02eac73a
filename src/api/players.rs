use uuid::Uuid;

use super::{CoachApi, Method};
use crate::error::ApiError;
use crate::model::player::{Player, PlayerCreate, PlayerGame, PlayerReport, PlayerReportCreate};
use crate::validation::GameStatRecord;

impl CoachApi {
    pub fn list_players(&self) -> Result<Vec<Player>, ApiError> {
        self.get("/players")
    }

    pub fn create_player(&self, player: &PlayerCreate) -> Result<Player, ApiError> {
        self.send(Method::Post, "/players", player)
    }

    pub fn get_player(&self, player_id: Uuid) -> Result<Player, ApiError> {
        self.get(&format!("/players/{}", player_id))
    }

    pub fn update_player(&self, player_id: Uuid, player: &PlayerCreate) -> Result<Player, ApiError> {
        self.send(Method::Put, &format!("/players/{}", player_id), player)
    }

    pub fn delete_player(&self, player_id: Uuid) -> Result<(), ApiError> {
        self.remove(&format!("/players/{}", player_id))
    }

    pub fn list_player_games(&self, player_id: Uuid) -> Result<Vec<PlayerGame>, ApiError> {
        self.get(&format!("/players/{}/games", player_id))
    }

    /// Store one game's box score. The record is re-checked so a hand-built record cannot bypass validation.
    pub fn create_player_game(&self, player_id: Uuid, record: &GameStatRecord) -> Result<PlayerGame, ApiError> {
        record.validate()?;
        self.send(Method::Post, &format!("/players/{}/games", player_id), record)
    }

    pub fn list_player_reports(&self, player_id: Uuid) -> Result<Vec<PlayerReport>, ApiError> {
        self.get(&format!("/players/{}/reports", player_id))
    }

    pub fn create_player_report(
        &self,
        player_id: Uuid,
        request: &PlayerReportCreate,
    ) -> Result<PlayerReport, ApiError> {
        self.send(Method::Post, &format!("/players/{}/reports", player_id), request)
    }
}
