use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub sport: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamCreate {
    pub name: String,
    #[serde(default = "default_sport")]
    pub sport: String,
}

impl TeamCreate {
    pub fn basketball(name: impl Into<String>) -> Self {
        Self { name: name.into(), sport: default_sport() }
    }
}

fn default_sport() -> String {
    "basketball".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub team_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user_email: Option<String>,
}

/// `GET /teams/{id}` returns the team together with its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamWithMembers {
    pub id: Uuid,
    pub name: String,
    pub sport: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}
