use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::player::PlayerGame;

/// `made / attempted` as a percentage rounded to one decimal, or `None` with no attempts.
pub fn shooting_pct(made: u32, attempted: u32) -> Option<f64> {
    if attempted == 0 {
        return None;
    }
    Some(round1(f64::from(made) / f64::from(attempted) * 100.0))
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Per-game averages across a set of games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonAverages {
    pub games_count: usize,
    pub pts_avg: f64,
    pub reb_avg: f64,
    pub ast_avg: f64,
    pub tov_avg: f64,
    pub minutes_avg: f64,
    pub fg_pct: f64,
    pub three_pct: f64,
    pub ft_pct: f64,
    pub ast_to_tov_ratio: f64,
}

impl SeasonAverages {
    /// `None` for an empty slice. Percentages are computed from totals, not averaged per game.
    pub fn from_games(games: &[PlayerGame]) -> Option<Self> {
        if games.is_empty() {
            return None;
        }
        let n = games.len() as f64;
        let sum = |f: fn(&PlayerGame) -> u32| games.iter().map(|g| u64::from(f(g))).sum::<u64>();
        let total_pct = |made: u64, att: u64| if att == 0 { 0.0 } else { round1(made as f64 / att as f64 * 100.0) };

        let ast = sum(|g| g.ast);
        let tov = sum(|g| g.tov);
        let ast_to_tov_ratio = if tov == 0 { ast as f64 } else { round1(ast as f64 / tov as f64) };

        Some(SeasonAverages {
            games_count: games.len(),
            pts_avg: round1(sum(|g| g.pts) as f64 / n),
            reb_avg: round1(sum(|g| g.reb) as f64 / n),
            ast_avg: round1(ast as f64 / n),
            tov_avg: round1(tov as f64 / n),
            minutes_avg: round1(sum(|g| g.minutes) as f64 / n),
            fg_pct: total_pct(sum(|g| g.fgm), sum(|g| g.fga)),
            three_pct: total_pct(sum(|g| g.tpm), sum(|g| g.tpa)),
            ft_pct: total_pct(sum(|g| g.ftm), sum(|g| g.fta)),
            ast_to_tov_ratio,
        })
    }
}

/// Human-readable span covered by a set of game dates, e.g. `Jan 05-12, 2025`.
pub fn report_window(dates: &[NaiveDate]) -> String {
    let (Some(start), Some(end)) = (dates.iter().min(), dates.iter().max()) else {
        return "No games".to_string();
    };
    if start == end {
        return start.format("%b %d, %Y").to_string();
    }
    if start.year() == end.year() {
        if start.month() == end.month() {
            return format!("{}-{}", start.format("%b %d"), end.format("%d, %Y"));
        }
        return format!("{}-{}", start.format("%b %d"), end.format("%b %d, %Y"));
    }
    format!("{}-{}", start.format("%b %d, %Y"), end.format("%b %d, %Y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn pct_rounds_to_one_decimal() {
        assert_eq!(shooting_pct(1, 3), Some(33.3));
        assert_eq!(shooting_pct(2, 3), Some(66.7));
        assert_eq!(shooting_pct(0, 0), None);
    }

    #[test]
    fn window_formats() {
        assert_eq!(report_window(&[]), "No games");
        assert_eq!(report_window(&[d(2025, 1, 5)]), "Jan 05, 2025");
        assert_eq!(report_window(&[d(2025, 1, 12), d(2025, 1, 5)]), "Jan 05-12, 2025");
        assert_eq!(report_window(&[d(2025, 1, 5), d(2025, 2, 2)]), "Jan 05-Feb 02, 2025");
        assert_eq!(report_window(&[d(2024, 12, 20), d(2025, 1, 5)]), "Dec 20, 2024-Jan 05, 2025");
    }
}
