use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Generating,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyInsight {
    pub title: String,
    pub description: String,
    pub evidence: String,
    pub confidence: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub title: String,
    pub description: String,
    pub metric: String,
    pub priority: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionForNextGame {
    pub question: String,
    pub context: String,
}

/// AI coaching report for a single game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub game_id: Uuid,
    pub status: ReportStatus,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub key_insights: Vec<KeyInsight>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    #[serde(default)]
    pub practice_focus: Option<String>,
    #[serde(default)]
    pub questions_for_next_game: Vec<QuestionForNextGame>,
    #[serde(default)]
    pub model_used: Option<String>,
    #[serde(default)]
    pub prompt_tokens: Option<u32>,
    #[serde(default)]
    pub completion_tokens: Option<u32>,
    #[serde(default)]
    pub generation_time_ms: Option<u64>,
    #[serde(default)]
    pub risk_flags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Generating => "generating",
            ReportStatus::Completed => "completed",
            ReportStatus::Failed => "failed",
        }
    }
}

impl Report {
    pub fn is_ready(&self) -> bool {
        self.status == ReportStatus::Completed
    }
}

pub const MAX_ADDITIONAL_CONTEXT: usize = 1000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateReportRequest {
    #[serde(default)]
    pub force_regenerate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateReportResponse {
    pub report: Report,
    pub was_regenerated: bool,
}
