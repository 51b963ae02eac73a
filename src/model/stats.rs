use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::insights::shooting_pct;
use crate::validation::{check_shooting, Shooting, ValidationErrors, TEAM_SHOTS};

/// Team box score for one game, the body of `POST /games/{id}/stats/basketball`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketballStatsCreate {
    pub points_for: u32,
    pub points_against: u32,
    #[serde(default)]
    pub fg_made: u32,
    #[serde(default)]
    pub fg_att: u32,
    #[serde(default)]
    pub three_made: u32,
    #[serde(default)]
    pub three_att: u32,
    #[serde(default)]
    pub ft_made: u32,
    #[serde(default)]
    pub ft_att: u32,
    #[serde(default)]
    pub rebounds_off: u32,
    #[serde(default)]
    pub rebounds_def: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub steals: u32,
    #[serde(default)]
    pub blocks: u32,
    #[serde(default)]
    pub turnovers: u32,
    #[serde(default)]
    pub fouls: u32,
    #[serde(default)]
    pub pace_estimate: Option<u32>,
}

impl BasketballStatsCreate {
    /// Made shots never exceed attempts, and threes are a subset of field goals.
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut violations = Vec::new();
        check_shooting(
            Shooting {
                fgm: Some(self.fg_made),
                fga: Some(self.fg_att),
                tpm: Some(self.three_made),
                tpa: Some(self.three_att),
                ftm: Some(self.ft_made),
                fta: Some(self.ft_att),
            },
            &TEAM_SHOTS,
            &mut violations,
        );
        ValidationErrors::from_violations(violations)
    }
}

/// Partial update for `PATCH /games/{id}/stats/basketball`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketballStatsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_for: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_against: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg_made: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg_att: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_made: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_att: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ft_made: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ft_att: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebounds_off: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebounds_def: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assists: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnovers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fouls: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace_estimate: Option<u32>,
}

impl BasketballStatsUpdate {
    /// Check the update as it would land on `current`.
    pub fn check_against(&self, current: &BasketballStats) -> Result<(), ValidationErrors> {
        let mut violations = Vec::new();
        check_shooting(
            Shooting {
                fgm: Some(self.fg_made.unwrap_or(current.fg_made)),
                fga: Some(self.fg_att.unwrap_or(current.fg_att)),
                tpm: Some(self.three_made.unwrap_or(current.three_made)),
                tpa: Some(self.three_att.unwrap_or(current.three_att)),
                ftm: Some(self.ft_made.unwrap_or(current.ft_made)),
                fta: Some(self.ft_att.unwrap_or(current.ft_att)),
            },
            &TEAM_SHOTS,
            &mut violations,
        );
        ValidationErrors::from_violations(violations)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketballStats {
    pub id: Uuid,
    pub game_id: Uuid,
    pub points_for: u32,
    pub points_against: u32,
    pub fg_made: u32,
    pub fg_att: u32,
    pub three_made: u32,
    pub three_att: u32,
    pub ft_made: u32,
    pub ft_att: u32,
    pub rebounds_off: u32,
    pub rebounds_def: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
    #[serde(default)]
    pub pace_estimate: Option<u32>,
    #[serde(default)]
    pub total_rebounds: Option<u32>,
    #[serde(default)]
    pub fg_percentage: Option<f64>,
    #[serde(default)]
    pub three_percentage: Option<f64>,
    #[serde(default)]
    pub ft_percentage: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl BasketballStats {
    /// Fill derived fields the service left out.
    pub fn with_derived(mut self) -> Self {
        if self.total_rebounds.is_none() {
            self.total_rebounds = Some(self.rebounds_off.saturating_add(self.rebounds_def));
        }
        if self.fg_percentage.is_none() {
            self.fg_percentage = shooting_pct(self.fg_made, self.fg_att);
        }
        if self.three_percentage.is_none() {
            self.three_percentage = shooting_pct(self.three_made, self.three_att);
        }
        if self.ft_percentage.is_none() {
            self.ft_percentage = shooting_pct(self.ft_made, self.ft_att);
        }
        self
    }

    pub fn margin(&self) -> i64 {
        i64::from(self.points_for) - i64::from(self.points_against)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(rebounds_off: u32, rebounds_def: u32) -> BasketballStats {
        BasketballStats {
            id: Uuid::nil(),
            game_id: Uuid::nil(),
            points_for: 0,
            points_against: 0,
            fg_made: 0,
            fg_att: 0,
            three_made: 0,
            three_att: 0,
            ft_made: 0,
            ft_att: 0,
            rebounds_off,
            rebounds_def,
            assists: 0,
            steals: 0,
            blocks: 0,
            turnovers: 0,
            fouls: 0,
            pace_estimate: None,
            total_rebounds: None,
            fg_percentage: None,
            three_percentage: None,
            ft_percentage: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn total_rebounds_saturates() {
        assert_eq!(stored(u32::MAX, 5).with_derived().total_rebounds, Some(u32::MAX));
        assert_eq!(stored(9, 21).with_derived().total_rebounds, Some(30));
    }

    #[test]
    fn update_is_checked_after_merging() {
        let current = BasketballStats { fg_made: 20, fg_att: 40, three_att: 10, ..stored(0, 0) };
        let update = BasketballStatsUpdate { fg_att: Some(8), ..Default::default() };
        let errors = update.check_against(&current).unwrap_err();
        assert!(errors.has("fg_made"));
        assert!(errors.has("three_att"));
        assert!(BasketballStatsUpdate { fg_made: Some(25), ..Default::default() }.check_against(&current).is_ok());
    }
}
