use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{ValidationErrors, Violation, ViolationKind};

pub const MAX_MISSING_TEXT: usize = 1000;

/// A coach's rating of a generated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackCreate {
    pub rating_1_5: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accurate_bool: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_text: Option<String>,
}

impl FeedbackCreate {
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut violations = Vec::new();
        if !(1..=5).contains(&self.rating_1_5) {
            violations.push(Violation::named("rating", "Rating", ViolationKind::OutOfRange { min: 1, max: 5 }));
        }
        if self.missing_text.as_deref().map(|t| t.chars().count() > MAX_MISSING_TEXT).unwrap_or(false) {
            violations.push(Violation::named(
                "missing_text",
                "Missing information",
                ViolationKind::TooLong { max: MAX_MISSING_TEXT },
            ));
        }
        ValidationErrors::from_violations(violations)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    pub report_id: Uuid,
    pub rating_1_5: u8,
    #[serde(default)]
    pub accurate_bool: Option<bool>,
    #[serde(default)]
    pub missing_text: Option<String>,
    pub created_at: DateTime<Utc>,
}
