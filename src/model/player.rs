use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::report::ReportStatus;
use crate::validation::GameStatRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerCreate {
    pub name: String,
    pub grade: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injuries: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub grade: String,
    pub position: String,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub goals: Option<Vec<String>>,
    #[serde(default)]
    pub competition_level: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub injuries: Option<String>,
    #[serde(default)]
    pub minutes_context: Option<String>,
    #[serde(default)]
    pub coach_notes: Option<String>,
    #[serde(default)]
    pub parent_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored player game, as returned by `/players/{id}/games`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerGame {
    pub id: Uuid,
    pub player_id: Uuid,
    pub game_date: NaiveDate,
    pub opponent: String,
    #[serde(default)]
    pub game_label: Option<String>,
    #[serde(default)]
    pub minutes: u32,
    pub pts: u32,
    pub reb: u32,
    pub ast: u32,
    pub stl: u32,
    pub blk: u32,
    pub tov: u32,
    pub fgm: u32,
    pub fga: u32,
    pub tpm: u32,
    pub tpa: u32,
    pub ftm: u32,
    pub fta: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub fg_pct: Option<f64>,
    #[serde(default)]
    pub three_pct: Option<f64>,
    #[serde(default)]
    pub ft_pct: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl PlayerGame {
    /// The submitted values as the service stored them. Absent minutes are stored as zero.
    pub fn to_record(&self) -> GameStatRecord {
        GameStatRecord {
            date: self.game_date,
            opponent: self.opponent.clone(),
            game_label: self.game_label.clone(),
            minutes: Some(self.minutes),
            pts: self.pts,
            reb: self.reb,
            ast: self.ast,
            stl: self.stl,
            blk: self.blk,
            tov: self.tov,
            fgm: self.fgm,
            fga: self.fga,
            tpm: self.tpm,
            tpa: self.tpa,
            ftm: self.ftm,
            fta: self.fta,
            notes: self.notes.clone(),
        }
    }

    /// True when this stored game carries exactly the values of `record`.
    pub fn matches(&self, record: &GameStatRecord) -> bool {
        let submitted = GameStatRecord { minutes: Some(record.minutes.unwrap_or(0)), ..record.clone() };
        self.to_record() == submitted
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerReportCreate {
    /// Games to include. The service picks the five most recent when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub id: Uuid,
    pub player_id: Uuid,
    pub status: ReportStatus,
    #[serde(default)]
    pub report_window: Option<String>,
    #[serde(default)]
    pub report_json: Option<serde_json::Value>,
    #[serde(default)]
    pub model_used: Option<String>,
    #[serde(default)]
    pub prompt_version: Option<String>,
    #[serde(default)]
    pub error_text: Option<String>,
    #[serde(default)]
    pub share_token: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}
