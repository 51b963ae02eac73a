use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::api::CoachApi;
use crate::csv_import::{self, CsvImportError};
use crate::dashboard::{self, LoadError, ViewScope};
use crate::error::ApiError;
use crate::model::feedback::FeedbackCreate;
use crate::model::game::GameCreate;
use crate::model::report::{GenerateReportRequest, MAX_ADDITIONAL_CONTEXT};
use crate::model::stats::BasketballStatsCreate;
use crate::validation::{self, GameStatForm, ValidationErrors, Violation, ViolationKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Mutating actions are validated but never sent.
    Test,
    #[default]
    Production,
}

/// One coach action, as the UI would trigger it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    ValidateStats {
        form: GameStatForm,
    },
    SubmitPlayerGame {
        player_id: Uuid,
        form: GameStatForm,
    },
    SubmitTeamGame {
        team_id: Uuid,
        game: GameCreate,
        stats: BasketballStatsCreate,
    },
    TeamDashboard,
    PlayerDashboard,
    GetReport {
        game_id: Uuid,
    },
    GenerateReport {
        game_id: Uuid,
        #[serde(default)]
        force_regenerate: bool,
        #[serde(default)]
        additional_context: Option<String>,
    },
    SubmitFeedback {
        report_id: Uuid,
        rating: u8,
        #[serde(default)]
        accurate: Option<bool>,
        #[serde(default)]
        missing_text: Option<String>,
    },
    ImportStatsCsv {
        game_id: Uuid,
        csv: String,
    },
    CsvTemplate,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::ValidateStats { .. } => "validate_stats",
            Action::SubmitPlayerGame { .. } => "submit_player_game",
            Action::SubmitTeamGame { .. } => "submit_team_game",
            Action::TeamDashboard => "team_dashboard",
            Action::PlayerDashboard => "player_dashboard",
            Action::GetReport { .. } => "get_report",
            Action::GenerateReport { .. } => "generate_report",
            Action::SubmitFeedback { .. } => "submit_feedback",
            Action::ImportStatsCsv { .. } => "import_stats_csv",
            Action::CsvTemplate => "csv_template",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub mode: Mode,
    pub action: Action,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    pub message: String,
    /// Transient error text for transport and service failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,
    /// Field-level problems, shown inline. Nothing was sent when these are present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Response {
    fn success<T: Serialize>(message: impl Into<String>, data: &T) -> Self {
        Response {
            ok: true,
            message: message.into(),
            data: serde_json::to_value(data).ok(),
            ..Default::default()
        }
    }

    fn invalid(errors: ValidationErrors) -> Self {
        Response {
            ok: false,
            message: "Please fix the highlighted fields".to_string(),
            violations: errors.into_violations(),
            ..Default::default()
        }
    }

    fn failed(message: impl Into<String>, notification: String) -> Self {
        Response { ok: false, message: message.into(), notification: Some(notification), ..Default::default() }
    }

    fn from_api_error(message: &str, e: ApiError) -> Self {
        match e {
            ApiError::Validation(errors) => Response::invalid(errors),
            other => {
                error!(error = %other, status = ?other.status(), "{}", message);
                Response::failed(message, other.notification())
            }
        }
    }

    fn from_load_error(message: &str, e: LoadError) -> Self {
        match e {
            LoadError::Api(api_error) => Response::from_api_error(message, api_error),
            LoadError::Cancelled => Response { ok: false, message: "Load cancelled".to_string(), ..Default::default() },
            LoadError::Task(msg) => Response::failed(message, msg),
        }
    }
}

#[instrument(skip(api, event))]
pub async fn handler(api: &CoachApi, event: LambdaEvent<Request>) -> Result<Response, Error> {
    dispatch(api, event.payload).await
}

/// Route one request. Failures come back as a `Response` with `ok: false`; only a task join failure is an `Err`.
pub async fn dispatch(api: &CoachApi, request: Request) -> Result<Response, Error> {
    let mode = request.mode;
    let action = request.action;
    info!(action = action.name(), mode = ?mode, "Handling coach action");

    match action {
        Action::TeamDashboard => {
            let scope = ViewScope::new();
            Ok(match dashboard::load_team_dashboard(api, &scope).await {
                Ok(d) => Response::success(format!("Loaded {} teams and {} games", d.teams.len(), d.total_games), &d),
                Err(e) => Response::from_load_error("Failed to load teams", e),
            })
        }
        Action::PlayerDashboard => {
            let scope = ViewScope::new();
            Ok(match dashboard::load_player_dashboard(api, &scope).await {
                Ok(d) => Response::success(format!("Loaded {} players", d.players.len()), &d),
                Err(e) => Response::from_load_error("Failed to load players", e),
            })
        }
        other => {
            // ureq is blocking; keep it off the async workers
            let api = api.clone();
            let response = tokio::task::spawn_blocking(move || run_blocking(&api, mode, other)).await?;
            Ok(response)
        }
    }
}

fn run_blocking(api: &CoachApi, mode: Mode, action: Action) -> Response {
    let dry_run = mode == Mode::Test;
    match action {
        Action::ValidateStats { form } => match validation::validate(&form) {
            Ok(record) => Response::success("Stats look good", &record),
            Err(errors) => Response::invalid(errors),
        },

        Action::SubmitPlayerGame { player_id, form } => {
            let record = match validation::validate(&form) {
                Ok(record) => record,
                Err(errors) => return Response::invalid(errors),
            };
            if dry_run {
                return Response::success("Test mode: game validated, not submitted", &record);
            }
            match api.create_player_game(player_id, &record) {
                Ok(game) => Response::success(format!("Game vs {} saved", game.opponent), &game),
                Err(e) => Response::from_api_error("Failed to save game", e),
            }
        }

        Action::SubmitTeamGame { team_id, game, stats } => {
            let mut violations = Vec::new();
            if game.opponent_name.trim().is_empty() {
                violations.push(Violation::named("opponent_name", "Opponent", ViolationKind::Required));
            }
            if let Err(errors) = stats.check() {
                violations.extend(errors.into_violations());
            }
            if let Err(errors) = ValidationErrors::from_violations(violations) {
                return Response::invalid(errors);
            }
            if dry_run {
                return Response::success("Test mode: game and stats validated, not submitted", &stats);
            }
            let created = match api.create_game(team_id, &game) {
                Ok(created) => created,
                Err(e) => return Response::from_api_error("Failed to create game", e),
            };
            match api.create_stats(created.id, &stats) {
                Ok(saved) => Response::success(
                    format!(
                        "Game vs {} saved ({}-{}, margin {:+})",
                        created.opponent_name,
                        saved.points_for,
                        saved.points_against,
                        saved.margin()
                    ),
                    &serde_json::json!({ "game": created, "stats": saved }),
                ),
                Err(e) => {
                    // the game already exists; hand it back with the error
                    let mut response = Response::from_api_error("Game created but stats could not be saved", e);
                    response.data = serde_json::to_value(&created).ok();
                    response
                }
            }
        }

        Action::GetReport { game_id } => match api.get_report(game_id) {
            Ok(report) => {
                let message = if report.is_ready() {
                    "Report loaded".to_string()
                } else {
                    format!("Report is {}", report.status.as_str())
                };
                Response::success(message, &report)
            }
            Err(e) => Response::from_api_error("Failed to load report", e),
        },

        Action::GenerateReport { game_id, force_regenerate, additional_context } => {
            if additional_context.as_deref().map(|c| c.chars().count() > MAX_ADDITIONAL_CONTEXT).unwrap_or(false) {
                return Response::invalid(single(Violation::named(
                    "additional_context",
                    "Additional context",
                    ViolationKind::TooLong { max: MAX_ADDITIONAL_CONTEXT },
                )));
            }
            if dry_run {
                return Response::success("Test mode: report not generated", &serde_json::json!({ "game_id": game_id }));
            }
            let request = GenerateReportRequest { force_regenerate, additional_context };
            match api.generate_report(game_id, &request) {
                Ok(generated) => {
                    let message = if generated.was_regenerated { "Report generated" } else { "Existing report returned" };
                    Response::success(message, &generated)
                }
                Err(e) => Response::from_api_error("Failed to generate report", e),
            }
        }

        Action::SubmitFeedback { report_id, rating, accurate, missing_text } => {
            let feedback = FeedbackCreate { rating_1_5: rating, accurate_bool: accurate, missing_text };
            if let Err(errors) = feedback.check() {
                return Response::invalid(errors);
            }
            if dry_run {
                return Response::success("Test mode: feedback validated, not submitted", &feedback);
            }
            match api.submit_feedback(report_id, &feedback) {
                Ok(saved) => Response::success("Thanks for the feedback", &saved),
                Err(e) => Response::from_api_error("Failed to submit feedback", e),
            }
        }

        Action::ImportStatsCsv { game_id, csv } => {
            let rows = match csv_import::parse_stats_csv(&csv) {
                Ok(rows) => rows,
                Err(CsvImportError::Invalid { row, errors }) => {
                    warn!(row, "CSV row failed validation");
                    return Response::invalid(errors);
                }
                Err(e) => return Response::failed("Could not import CSV", e.to_string()),
            };
            if rows.len() > 1 {
                warn!(rows = rows.len(), "CSV has multiple rows, using first row only");
            }
            let first = &rows[0];
            if dry_run {
                return Response::success("Test mode: CSV parsed, not submitted", first);
            }
            match api.create_stats(game_id, first) {
                Ok(saved) => Response::success("Stats imported", &saved),
                Err(e) => Response::from_api_error("Failed to import stats", e),
            }
        }

        Action::CsvTemplate => Response::success("CSV template", &csv_import::template()),

        Action::TeamDashboard | Action::PlayerDashboard => {
            Response::failed("Unsupported action", "Dashboards load asynchronously".to_string())
        }
    }
}

fn single(violation: Violation) -> ValidationErrors {
    match ValidationErrors::from_violations(vec![violation]) {
        Err(errors) => errors,
        Ok(()) => unreachable!("one violation is never empty"),
    }
}
