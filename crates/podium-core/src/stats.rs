//! Per-sport aggregated statistics
//!
//! A [`SportStat`] is the aggregate for one (user, sport) pair. It is written
//! by the match-result pipeline and only ever read by the achievement engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Rating a fresh stat record starts from
pub const DEFAULT_ELO: f64 = 1000.0;

/// Aggregated statistics for one user in one sport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportStat {
    pub user_id: String,
    pub sport: String,
    #[serde(default)]
    pub matches_played: i64,
    #[serde(default)]
    pub wins: i64,
    #[serde(default)]
    pub losses: i64,
    #[serde(default)]
    pub draws: i64,
    /// Goals or points scored, depending on the sport
    #[serde(default)]
    pub goals_scored: i64,
    #[serde(default)]
    pub assists: i64,
    /// Elo-like rating
    #[serde(default = "default_elo")]
    pub elo: f64,
    /// Signed run length: positive for a winning run, negative for a losing run
    #[serde(default)]
    pub streak: i32,
    /// Additional sport-specific metrics addressable by name from criteria
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, f64>,
}

fn default_elo() -> f64 {
    DEFAULT_ELO
}

impl SportStat {
    /// Create an empty stat record for a user and sport
    pub fn new(user_id: impl Into<String>, sport: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            sport: sport.into(),
            matches_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            goals_scored: 0,
            assists: 0,
            elo: DEFAULT_ELO,
            streak: 0,
            extra: HashMap::new(),
        }
    }

    /// Set an additional named metric
    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Read a field as a number
    ///
    /// Built-in fields are always present. Custom fields return `None` when
    /// the record does not carry that metric.
    pub fn get(&self, field: &StatField) -> Option<f64> {
        match field {
            StatField::MatchesPlayed => Some(self.matches_played as f64),
            StatField::Wins => Some(self.wins as f64),
            StatField::Losses => Some(self.losses as f64),
            StatField::Draws => Some(self.draws as f64),
            StatField::GoalsScored => Some(self.goals_scored as f64),
            StatField::Assists => Some(self.assists as f64),
            StatField::Elo => Some(self.elo),
            StatField::Streak => Some(self.streak as f64),
            StatField::Custom(name) => self.extra.get(name).copied(),
        }
    }

    /// Whether this record belongs to the given sport (case-insensitive)
    pub fn is_sport(&self, sport: &str) -> bool {
        self.sport.trim().eq_ignore_ascii_case(sport.trim())
    }
}

/// A stat column addressable from a criteria node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatField {
    MatchesPlayed,
    Wins,
    Losses,
    Draws,
    GoalsScored,
    Assists,
    Elo,
    Streak,
    /// A metric stored in [`SportStat::extra`]
    Custom(String),
}

impl StatField {
    /// Resolve a field name; camelCase and snake_case spellings are accepted.
    /// Names that are not built-in columns address the custom metric map.
    pub fn from_name(name: &str) -> Self {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "matchesplayed" | "matches" | "played" | "gamesplayed" => StatField::MatchesPlayed,
            "wins" => StatField::Wins,
            "losses" => StatField::Losses,
            "draws" | "ties" => StatField::Draws,
            "goals" | "goalsscored" | "points" | "pointsscored" => StatField::GoalsScored,
            "assists" => StatField::Assists,
            "elo" | "rating" => StatField::Elo,
            "streak" => StatField::Streak,
            _ => {
                log::debug!("Field '{}' is not a built-in stat, using custom metric", name);
                StatField::Custom(name.trim().to_string())
            }
        }
    }

    /// Canonical (camelCase) name
    pub fn name(&self) -> &str {
        match self {
            StatField::MatchesPlayed => "matchesPlayed",
            StatField::Wins => "wins",
            StatField::Losses => "losses",
            StatField::Draws => "draws",
            StatField::GoalsScored => "goalsScored",
            StatField::Assists => "assists",
            StatField::Elo => "elo",
            StatField::Streak => "streak",
            StatField::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, StatField::Custom(_))
    }
}

impl From<&str> for StatField {
    fn from(name: &str) -> Self {
        StatField::from_name(name)
    }
}

impl From<String> for StatField {
    fn from(name: String) -> Self {
        StatField::from_name(&name)
    }
}

impl From<StatField> for String {
    fn from(field: StatField) -> Self {
        field.name().to_string()
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
