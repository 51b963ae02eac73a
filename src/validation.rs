//! Game-statistics validation.
//!
//! A box-score entry arrives as a [`GameStatForm`] of raw strings, exactly as a coach typed it.
//! [`validate`] turns it into a [`GameStatRecord`] or reports every problem at once, so the
//! caller can show all violations next to their fields in one pass.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Every input field a violation can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Date,
    Opponent,
    Minutes,
    Pts,
    Reb,
    Ast,
    Stl,
    Blk,
    Tov,
    Fgm,
    Fga,
    Tpm,
    Tpa,
    Ftm,
    Fta,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Opponent => "opponent",
            Field::Minutes => "minutes",
            Field::Pts => "pts",
            Field::Reb => "reb",
            Field::Ast => "ast",
            Field::Stl => "stl",
            Field::Blk => "blk",
            Field::Tov => "tov",
            Field::Fgm => "fgm",
            Field::Fga => "fga",
            Field::Tpm => "tpm",
            Field::Tpa => "tpa",
            Field::Ftm => "ftm",
            Field::Fta => "fta",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::Opponent => "Opponent",
            Field::Minutes => "Minutes",
            Field::Pts => "Points",
            Field::Reb => "Rebounds",
            Field::Ast => "Assists",
            Field::Stl => "Steals",
            Field::Blk => "Blocks",
            Field::Tov => "Turnovers",
            Field::Fgm => "Field goals made",
            Field::Fga => "Field goals attempted",
            Field::Tpm => "Three-pointers made",
            Field::Tpa => "Three-pointers attempted",
            Field::Ftm => "Free throws made",
            Field::Fta => "Free throws attempted",
        }
    }

    /// Upper sanity bound for numeric fields.
    pub fn ceiling(&self) -> Option<u32> {
        match self {
            Field::Minutes => Some(60),
            Field::Pts => Some(150),
            Field::Reb | Field::Ast => Some(50),
            Field::Stl | Field::Blk | Field::Tov => Some(30),
            Field::Fgm | Field::Fga => Some(100),
            Field::Tpm | Field::Tpa | Field::Ftm | Field::Fta => Some(60),
            Field::Date | Field::Opponent => None,
        }
    }
}

impl AsRef<str> for Field {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    Required,
    InvalidDate,
    /// Input was not a whole number at all.
    NotANumber,
    /// A number, but outside the field's plausible range.
    OutOfRange { min: i64, max: i64 },
    MadeExceedsAttempted { attempted: String },
    ThreesExceedFieldGoals,
    TooLong { max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Wire name of the offending input, e.g. `fgm` or `fg_made`.
    pub field: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    fn new(field: Field, kind: ViolationKind) -> Self {
        Self::named(field.as_str(), field.label(), kind)
    }

    pub(crate) fn named(field: &str, label: &str, kind: ViolationKind) -> Self {
        let message = match &kind {
            ViolationKind::Required => format!("{} is required", label),
            ViolationKind::InvalidDate => "Please enter a valid date (YYYY-MM-DD)".to_string(),
            ViolationKind::NotANumber => "Please enter a whole number".to_string(),
            ViolationKind::OutOfRange { min, max } => {
                format!("{} must be between {} and {}", label, min, max)
            }
            ViolationKind::MadeExceedsAttempted { .. } => {
                format!("{} cannot exceed attempted", label)
            }
            ViolationKind::ThreesExceedFieldGoals => {
                "Three-point attempts cannot exceed field goal attempts".to_string()
            }
            ViolationKind::TooLong { max } => format!("{} must be at most {} characters", label, max),
        };
        Violation { field: field.to_string(), kind, message }
    }
}

/// A non-empty set of violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.0
    }

    pub fn for_field<F: AsRef<str>>(&self, field: F) -> impl Iterator<Item = &Violation> {
        self.0.iter().filter(move |v| v.field == field.as_ref())
    }

    pub fn has<F: AsRef<str>>(&self, field: F) -> bool {
        self.for_field(field).next().is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn from_violations(violations: Vec<Violation>) -> Result<(), ValidationErrors> {
        if violations.is_empty() { Ok(()) } else { Err(ValidationErrors(violations)) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|v| format!("{}: {}", v.field, v.message)).collect();
        write!(f, "Validation failed: {}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw form input. Every value is the string the coach typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStatForm {
    pub date: String,
    pub opponent: String,
    pub game_label: String,
    pub minutes: String,
    pub pts: String,
    pub reb: String,
    pub ast: String,
    pub stl: String,
    pub blk: String,
    pub tov: String,
    pub fgm: String,
    pub fga: String,
    pub tpm: String,
    pub tpa: String,
    pub ftm: String,
    pub fta: String,
    pub notes: String,
}

/// One player's box score for one game. This is also the body of `POST /players/{id}/games`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatRecord {
    #[serde(rename = "game_date")]
    pub date: NaiveDate,
    pub opponent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl GameStatRecord {
    /// An all-zero record, handy as a base for struct-update syntax.
    pub fn empty(date: NaiveDate, opponent: impl Into<String>) -> Self {
        GameStatRecord {
            date,
            opponent: opponent.into(),
            game_label: None,
            minutes: None,
            pts: 0,
            reb: 0,
            ast: 0,
            stl: 0,
            blk: 0,
            tov: 0,
            fgm: 0,
            fga: 0,
            tpm: 0,
            tpa: 0,
            ftm: 0,
            fta: 0,
            notes: None,
        }
    }

    /// Check an already-typed record: opponent presence, ceilings, and the shooting relationships.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut violations = Vec::new();
        if self.opponent.trim().is_empty() {
            violations.push(Violation::new(Field::Opponent, ViolationKind::Required));
        }
        let counts = [
            (Field::Minutes, self.minutes),
            (Field::Pts, Some(self.pts)),
            (Field::Reb, Some(self.reb)),
            (Field::Ast, Some(self.ast)),
            (Field::Stl, Some(self.stl)),
            (Field::Blk, Some(self.blk)),
            (Field::Tov, Some(self.tov)),
            (Field::Fgm, Some(self.fgm)),
            (Field::Fga, Some(self.fga)),
            (Field::Tpm, Some(self.tpm)),
            (Field::Tpa, Some(self.tpa)),
            (Field::Ftm, Some(self.ftm)),
            (Field::Fta, Some(self.fta)),
        ];
        for (field, value) in counts {
            if let Some(v) = value {
                check_range(field, i64::from(v), &mut violations);
            }
        }
        check_shooting(
            Shooting {
                fgm: Some(self.fgm),
                fga: Some(self.fga),
                tpm: Some(self.tpm),
                tpa: Some(self.tpa),
                ftm: Some(self.ftm),
                fta: Some(self.fta),
            },
            &PLAYER_SHOTS,
            &mut violations,
        );
        ValidationErrors::from_violations(violations)
    }
}

/// Shooting numbers that parsed successfully. `None` skips any rule that needs the value.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Shooting {
    pub fgm: Option<u32>,
    pub fga: Option<u32>,
    pub tpm: Option<u32>,
    pub tpa: Option<u32>,
    pub ftm: Option<u32>,
    pub fta: Option<u32>,
}

/// Wire names of the six shooting inputs. Player games and team box scores spell them differently.
pub(crate) struct ShotNames {
    pub fgm: &'static str,
    pub fga: &'static str,
    pub tpm: &'static str,
    pub tpa: &'static str,
    pub ftm: &'static str,
    pub fta: &'static str,
}

pub(crate) const PLAYER_SHOTS: ShotNames =
    ShotNames { fgm: "fgm", fga: "fga", tpm: "tpm", tpa: "tpa", ftm: "ftm", fta: "fta" };

pub(crate) const TEAM_SHOTS: ShotNames = ShotNames {
    fgm: "fg_made",
    fga: "fg_att",
    tpm: "three_made",
    tpa: "three_att",
    ftm: "ft_made",
    fta: "ft_att",
};

/// made <= attempted for each shot type, and three-point attempts <= field goal attempts.
pub(crate) fn check_shooting(s: Shooting, names: &ShotNames, violations: &mut Vec<Violation>) {
    let pairs = [
        (names.fgm, Field::Fgm.label(), s.fgm, names.fga, s.fga),
        (names.tpm, Field::Tpm.label(), s.tpm, names.tpa, s.tpa),
        (names.ftm, Field::Ftm.label(), s.ftm, names.fta, s.fta),
    ];
    for (made_name, made_label, made, att_name, att) in pairs {
        if let (Some(made), Some(att)) = (made, att) {
            if made > att {
                violations.push(Violation::named(
                    made_name,
                    made_label,
                    ViolationKind::MadeExceedsAttempted { attempted: att_name.to_string() },
                ));
            }
        }
    }
    if let (Some(tpa), Some(fga)) = (s.tpa, s.fga) {
        if tpa > fga {
            violations.push(Violation::named(
                names.tpa,
                Field::Tpa.label(),
                ViolationKind::ThreesExceedFieldGoals,
            ));
        }
    }
}

fn check_range(field: Field, value: i64, violations: &mut Vec<Violation>) -> bool {
    let max = i64::from(field.ceiling().unwrap_or(u32::MAX));
    if value < 0 || value > max {
        violations.push(Violation::new(field, ViolationKind::OutOfRange { min: 0, max }));
        return false;
    }
    true
}

/// Parse one numeric input. Blank counts as absent; anything else must be a whole number in range.
fn parse_count(field: Field, raw: &str, violations: &mut Vec<Violation>) -> Result<Option<u32>, ()> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let Ok(value) = trimmed.parse::<i64>() else {
        // digits that overflow i64 are still a number, just far out of range
        let kind = if is_integer_text(trimmed) {
            ViolationKind::OutOfRange { min: 0, max: i64::from(field.ceiling().unwrap_or(u32::MAX)) }
        } else {
            ViolationKind::NotANumber
        };
        violations.push(Violation::new(field, kind));
        return Err(());
    };
    if !check_range(field, value, violations) {
        return Err(());
    }
    // check_range guarantees 0..=ceiling, which fits in u32
    Ok(Some(value as u32))
}

/// Optional sign followed by at least one ASCII digit.
fn is_integer_text(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

/// Validate a submitted form. Reports every violation; never stops at the first one.
pub fn validate(form: &GameStatForm) -> Result<GameStatRecord, ValidationErrors> {
    let mut violations = Vec::new();

    let date = if form.date.trim().is_empty() {
        violations.push(Violation::new(Field::Date, ViolationKind::Required));
        None
    } else {
        match NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(_) => {
                violations.push(Violation::new(Field::Date, ViolationKind::InvalidDate));
                None
            }
        }
    };

    let opponent = form.opponent.trim();
    if opponent.is_empty() {
        violations.push(Violation::new(Field::Opponent, ViolationKind::Required));
    }

    let mut count = |field: Field, raw: &str| parse_count(field, raw, &mut violations);
    let minutes = count(Field::Minutes, &form.minutes);
    let pts = count(Field::Pts, &form.pts);
    let reb = count(Field::Reb, &form.reb);
    let ast = count(Field::Ast, &form.ast);
    let stl = count(Field::Stl, &form.stl);
    let blk = count(Field::Blk, &form.blk);
    let tov = count(Field::Tov, &form.tov);
    let fgm = count(Field::Fgm, &form.fgm);
    let fga = count(Field::Fga, &form.fga);
    let tpm = count(Field::Tpm, &form.tpm);
    let tpa = count(Field::Tpa, &form.tpa);
    let ftm = count(Field::Ftm, &form.ftm);
    let fta = count(Field::Fta, &form.fta);

    // Blank counting stats are zero; a field that failed to parse takes no part in cross-field rules.
    let zeroed = |r: Result<Option<u32>, ()>| r.ok().map(|v| v.unwrap_or(0));
    check_shooting(
        Shooting {
            fgm: zeroed(fgm),
            fga: zeroed(fga),
            tpm: zeroed(tpm),
            tpa: zeroed(tpa),
            ftm: zeroed(ftm),
            fta: zeroed(fta),
        },
        &PLAYER_SHOTS,
        &mut violations,
    );

    if !violations.is_empty() {
        return Err(ValidationErrors(violations));
    }
    let Some(date) = date else {
        return Err(ValidationErrors(vec![Violation::new(Field::Date, ViolationKind::Required)]));
    };

    let value = |r: Result<Option<u32>, ()>| r.ok().flatten().unwrap_or(0);
    Ok(GameStatRecord {
        date,
        opponent: opponent.to_string(),
        game_label: optional_text(&form.game_label),
        minutes: minutes.ok().flatten(),
        pts: value(pts),
        reb: value(reb),
        ast: value(ast),
        stl: value(stl),
        blk: value(blk),
        tov: value(tov),
        fgm: value(fgm),
        fga: value(fga),
        tpm: value(tpm),
        tpa: value(tpa),
        ftm: value(ftm),
        fta: value(fta),
        notes: optional_text(&form.notes),
    })
}
