use uuid::Uuid;

use super::{CoachApi, Method};
use crate::error::ApiError;
use crate::model::game::{Game, GameCreate, GameWithStats};
use crate::model::stats::{BasketballStats, BasketballStatsCreate, BasketballStatsUpdate};

impl CoachApi {
    pub fn list_games(&self, team_id: Uuid) -> Result<Vec<Game>, ApiError> {
        self.get(&format!("/teams/{}/games", team_id))
    }

    pub fn create_game(&self, team_id: Uuid, game: &GameCreate) -> Result<Game, ApiError> {
        self.send(Method::Post, &format!("/teams/{}/games", team_id), game)
    }

    pub fn get_game(&self, game_id: Uuid) -> Result<GameWithStats, ApiError> {
        self.get(&format!("/games/{}", game_id))
    }

    pub fn delete_game(&self, game_id: Uuid) -> Result<(), ApiError> {
        self.remove(&format!("/games/{}", game_id))
    }

    pub fn get_stats(&self, game_id: Uuid) -> Result<BasketballStats, ApiError> {
        self.get::<BasketballStats>(&format!("/games/{}/stats/basketball", game_id))
            .map(BasketballStats::with_derived)
    }

    /// Record the box score. Inconsistent shooting numbers are rejected before sending.
    pub fn create_stats(&self, game_id: Uuid, stats: &BasketballStatsCreate) -> Result<BasketballStats, ApiError> {
        stats.check()?;
        self.send::<_, BasketballStats>(Method::Post, &format!("/games/{}/stats/basketball", game_id), stats)
            .map(BasketballStats::with_derived)
    }

    /// Patch the box score. The merged result is checked against the stored numbers first.
    pub fn update_stats(&self, game_id: Uuid, update: &BasketballStatsUpdate) -> Result<BasketballStats, ApiError> {
        let current = self.get_stats(game_id)?;
        update.check_against(&current)?;
        self.send::<_, BasketballStats>(Method::Patch, &format!("/games/{}/stats/basketball", game_id), update)
            .map(BasketballStats::with_derived)
    }
}
