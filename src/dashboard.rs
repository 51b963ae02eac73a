//! Dashboard loads: one list request, then one concurrent request per listed item.
//!
//! A failed item never sinks the whole load. It is kept in the result with its error and left
//! out of every total, and the dashboard carries a note saying so.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::api::CoachApi;
use crate::error::ApiError;
use crate::insights::{report_window, SeasonAverages};
use crate::model::game::Game;
use crate::model::player::Player;
use crate::model::team::Team;

/// Lifetime of one view. Closing it makes any load still in flight discard its results.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    closed: Arc<AtomicBool>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        !self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<(), LoadError> {
        if self.is_open() { Ok(()) } else { Err(LoadError::Cancelled) }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("View closed before the load finished")]
    Cancelled,

    #[error("Background task failed: {0}")]
    Task(String),
}

/// Run `fetch` for every item on the blocking pool, all at once, and collect every outcome.
///
/// Outcomes keep the input order. Panicked tasks become failed items.
pub async fn fan_out<K, T, F>(
    scope: &ViewScope,
    items: Vec<K>,
    fetch: F,
) -> Result<Vec<(K, Result<T, String>)>, LoadError>
where
    K: Clone + Send + 'static,
    T: Send + 'static,
    F: Fn(K) -> Result<T, ApiError> + Clone + Send + 'static,
{
    let mut handles = Vec::with_capacity(items.len());
    for item in items {
        // each blocking task owns its inputs
        let fetch = fetch.clone();
        let key = item.clone();
        let handle = tokio::task::spawn_blocking(move || fetch(key).map_err(|e| e.notification()));
        handles.push((item, handle));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (item, handle) in handles {
        let outcome = match handle.await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "Fan-out task join error");
                Err(format!("Task join error: {}", e))
            }
        };
        scope.ensure_open()?;
        outcomes.push((item, outcome));
    }
    Ok(outcomes)
}

/// Run one blocking call off the async runtime.
async fn blocking<T, F>(scope: &ViewScope, call: F) -> Result<T, LoadError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| LoadError::Task(e.to_string()))?;
    scope.ensure_open()?;
    Ok(result?)
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamSummary {
    pub team: Team,
    pub games: Vec<Game>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamDashboard {
    pub teams: Vec<TeamSummary>,
    pub total_games: usize,
    pub games_with_stats: usize,
    pub games_with_reports: usize,
    pub notes: Vec<String>,
}

impl TeamDashboard {
    fn from_outcomes(outcomes: Vec<(Team, Result<Vec<Game>, String>)>) -> Self {
        let mut teams = Vec::with_capacity(outcomes.len());
        let mut notes = Vec::new();
        for (team, outcome) in outcomes {
            match outcome {
                Ok(games) => teams.push(TeamSummary { team, games, error: None }),
                Err(e) => {
                    notes.push(format!("Games for {} could not be loaded ({}); not included in totals.", team.name, e));
                    teams.push(TeamSummary { team, games: Vec::new(), error: Some(e) });
                }
            }
        }
        let loaded = || teams.iter().filter(|t| t.error.is_none()).flat_map(|t| t.games.iter());
        let total_games = loaded().count();
        let games_with_stats = loaded().filter(|g| g.has_stats).count();
        let games_with_reports = loaded().filter(|g| g.has_report).count();
        TeamDashboard { teams, total_games, games_with_stats, games_with_reports, notes }
    }

    pub fn failed_teams(&self) -> usize {
        self.teams.iter().filter(|t| t.error.is_some()).count()
    }
}

/// Every team with its games. Fails only if the team list itself cannot be loaded.
#[instrument(level = "info", skip(api, scope))]
pub async fn load_team_dashboard(api: &CoachApi, scope: &ViewScope) -> Result<TeamDashboard, LoadError> {
    let teams = {
        let api = api.clone();
        blocking(scope, move || api.list_teams()).await?
    };
    let fetch_api = api.clone();
    let outcomes = fan_out(scope, teams, move |team: Team| fetch_api.list_games(team.id)).await?;
    let dashboard = TeamDashboard::from_outcomes(outcomes);
    if dashboard.failed_teams() > 0 {
        warn!(failed = dashboard.failed_teams(), "Team dashboard loaded with partial results");
    }
    info!(teams = dashboard.teams.len(), total_games = dashboard.total_games, "Loaded team dashboard");
    Ok(dashboard)
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub player: Player,
    pub games_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub averages: Option<SeasonAverages>,
    pub report_window: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerDashboard {
    pub players: Vec<PlayerSummary>,
    pub total_games: usize,
    pub notes: Vec<String>,
}

/// Every player with averages over their recorded games.
#[instrument(level = "info", skip(api, scope))]
pub async fn load_player_dashboard(api: &CoachApi, scope: &ViewScope) -> Result<PlayerDashboard, LoadError> {
    let players = {
        let api = api.clone();
        blocking(scope, move || api.list_players()).await?
    };
    let fetch_api = api.clone();
    let outcomes = fan_out(scope, players, move |player: Player| fetch_api.list_player_games(player.id)).await?;

    let mut summaries = Vec::with_capacity(outcomes.len());
    let mut notes = Vec::new();
    let mut total_games = 0;
    for (player, outcome) in outcomes {
        match outcome {
            Ok(games) => {
                total_games += games.len();
                let dates: Vec<_> = games.iter().map(|g| g.game_date).collect();
                summaries.push(PlayerSummary {
                    games_count: games.len(),
                    averages: SeasonAverages::from_games(&games),
                    report_window: report_window(&dates),
                    error: None,
                    player,
                });
            }
            Err(e) => {
                notes.push(format!("Games for {} could not be loaded ({}); not included in totals.", player.name, e));
                summaries.push(PlayerSummary {
                    games_count: 0,
                    averages: None,
                    report_window: report_window(&[]),
                    error: Some(e),
                    player,
                });
            }
        }
    }
    info!(players = summaries.len(), total_games, "Loaded player dashboard");
    Ok(PlayerDashboard { players: summaries, total_games, notes })
}
