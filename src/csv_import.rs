//! Team box-score import from spreadsheet exports.
//!
//! Headers are matched loosely (`FGM`, `field goals made` and `fg_made` all land on the same
//! column) so exports from different scorebook apps can be used without editing.

use thiserror::Error;
use tracing::{info, instrument};

use crate::model::stats::BasketballStatsCreate;
use crate::validation::ValidationErrors;

/// Canonical column order, also used for the downloadable template.
pub const COLUMNS: [&str; 16] = [
    "points_for",
    "points_against",
    "fg_made",
    "fg_att",
    "three_made",
    "three_att",
    "ft_made",
    "ft_att",
    "rebounds_off",
    "rebounds_def",
    "assists",
    "steals",
    "blocks",
    "turnovers",
    "fouls",
    "pace_estimate",
];

const REQUIRED: [&str; 2] = ["points_for", "points_against"];

const ALIASES: [(&str, &str); 34] = [
    ("points scored", "points_for"),
    ("our score", "points_for"),
    ("team score", "points_for"),
    ("points allowed", "points_against"),
    ("opponent score", "points_against"),
    ("opp score", "points_against"),
    ("field goals made", "fg_made"),
    ("fgm", "fg_made"),
    ("field goals attempted", "fg_att"),
    ("fga", "fg_att"),
    ("3pt made", "three_made"),
    ("3pm", "three_made"),
    ("threes made", "three_made"),
    ("3pt attempted", "three_att"),
    ("3pa", "three_att"),
    ("threes attempted", "three_att"),
    ("free throws made", "ft_made"),
    ("ftm", "ft_made"),
    ("free throws attempted", "ft_att"),
    ("fta", "ft_att"),
    ("offensive rebounds", "rebounds_off"),
    ("off reb", "rebounds_off"),
    ("oreb", "rebounds_off"),
    ("defensive rebounds", "rebounds_def"),
    ("def reb", "rebounds_def"),
    ("dreb", "rebounds_def"),
    ("ast", "assists"),
    ("stl", "steals"),
    ("blk", "blocks"),
    ("to", "turnovers"),
    ("tov", "turnovers"),
    ("pf", "fouls"),
    ("personal fouls", "fouls"),
    ("pace", "pace_estimate"),
];

#[derive(Debug, Error, PartialEq)]
pub enum CsvImportError {
    #[error("CSV file is empty or has no headers")]
    Empty,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV file has no data rows")]
    NoRows,

    #[error("Error parsing row {row}: invalid value '{value}' for {column}")]
    InvalidValue { row: usize, column: String, value: String },

    #[error("Row {row}: {errors}")]
    Invalid { row: usize, errors: ValidationErrors },
}

const EXAMPLE_ROW: [&str; 16] =
    ["85", "78", "32", "65", "8", "22", "13", "18", "12", "28", "22", "8", "5", "14", "18", ""];

/// Header line plus one filled-in example row.
pub fn template() -> String {
    format!("{}\n{}\n", COLUMNS.join(","), EXAMPLE_ROW.join(","))
}

/// Map a header cell onto a canonical column name.
pub fn normalize_column(raw: &str) -> String {
    let normalized = raw.trim().to_lowercase().replace('_', " ");
    if let Some((_, canonical)) = ALIASES.iter().find(|(alias, _)| *alias == normalized) {
        return canonical.to_string();
    }
    normalized.replace(' ', "_")
}

/// Split the whole input into records of cells, honouring double-quoted cells and `""` escapes.
/// A line break inside quotes belongs to the cell.
fn split_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => record.push(std::mem::take(&mut cell)),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                record.push(std::mem::take(&mut cell));
                records.push(std::mem::take(&mut record));
            }
            _ => cell.push(c),
        }
    }
    if !cell.is_empty() || !record.is_empty() {
        record.push(cell);
        records.push(record);
    }
    records
}

fn is_blank(record: &[String]) -> bool {
    record.iter().all(|c| c.trim().is_empty())
}

fn set_column(stats: &mut BasketballStatsCreate, column: &str, value: u32) {
    let slot = match column {
        "points_for" => &mut stats.points_for,
        "points_against" => &mut stats.points_against,
        "fg_made" => &mut stats.fg_made,
        "fg_att" => &mut stats.fg_att,
        "three_made" => &mut stats.three_made,
        "three_att" => &mut stats.three_att,
        "ft_made" => &mut stats.ft_made,
        "ft_att" => &mut stats.ft_att,
        "rebounds_off" => &mut stats.rebounds_off,
        "rebounds_def" => &mut stats.rebounds_def,
        "assists" => &mut stats.assists,
        "steals" => &mut stats.steals,
        "blocks" => &mut stats.blocks,
        "turnovers" => &mut stats.turnovers,
        "fouls" => &mut stats.fouls,
        _ => return,
    };
    *slot = value;
}

/// Parse and check every row. Row numbers in errors count records, with the header as row 1.
#[instrument(level = "info", skip(content), fields(bytes = content.len()))]
pub fn parse_stats_csv(content: &str) -> Result<Vec<BasketballStatsCreate>, CsvImportError> {
    // record number -> cells; blank records are skipped but still counted
    let mut records = split_records(content).into_iter().enumerate().filter(|(_, r)| !is_blank(r));
    let (_, header) = records.next().ok_or(CsvImportError::Empty)?;

    // recognised columns in header order, so a later duplicate overrides an earlier one
    let mapping: Vec<(usize, String)> = header
        .iter()
        .enumerate()
        .map(|(i, h)| (i, normalize_column(h)))
        .filter(|(_, c)| COLUMNS.contains(&c.as_str()))
        .collect();

    let missing: Vec<String> = REQUIRED
        .iter()
        .filter(|r| !mapping.iter().any(|(_, c)| c == *r))
        .map(|r| r.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CsvImportError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    for (idx, cells) in records {
        let row = idx + 1;
        let mut stats = BasketballStatsCreate::default();
        for (pos, column) in &mapping {
            let value = cells.get(*pos).map(|c| c.trim()).unwrap_or("");
            if value.is_empty() {
                continue;
            }
            if column == "pace_estimate" {
                stats.pace_estimate = value.parse::<u32>().ok();
                continue;
            }
            let parsed = value.parse::<u32>().map_err(|_| CsvImportError::InvalidValue {
                row,
                column: column.clone(),
                value: value.to_string(),
            })?;
            set_column(&mut stats, column, parsed);
        }
        stats.check().map_err(|errors| CsvImportError::Invalid { row, errors })?;
        rows.push(stats);
    }

    if rows.is_empty() {
        return Err(CsvImportError::NoRows);
    }
    info!(rows = rows.len(), "Parsed box score CSV");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_aliases_and_spacing() {
        assert_eq!(normalize_column(" FGM "), "fg_made");
        assert_eq!(normalize_column("3PA"), "three_att");
        assert_eq!(normalize_column("Points_For"), "points_for");
        assert_eq!(normalize_column("Personal Fouls"), "fouls");
        assert_eq!(normalize_column("Minutes Played"), "minutes_played");
    }

    #[test]
    fn splits_quoted_cells() {
        assert_eq!(split_records(r#"a,"b,c","say ""hi""""#), vec![vec!["a", "b,c", r#"say "hi""#]]);
    }

    #[test]
    fn quoted_line_break_stays_in_the_cell() {
        let records = split_records("a,b\r\n1,\"two\nlines\"\r\n3,4");
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], vec!["1", "two\nlines"]);
        assert_eq!(records[2], vec!["3", "4"]);
    }

    #[test]
    fn template_lists_all_columns() {
        let t = template();
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("points_for,points_against,fg_made"));
        assert!(lines[0].ends_with("pace_estimate"));
        assert!(lines[1].starts_with("85,78,32,65"));
    }
}
