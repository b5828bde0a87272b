//! Achievement definitions

use crate::criteria::Criteria;
use crate::error::CoreError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Achievement identifier (catalog slug)
pub type AchievementId = String;

/// Wildcard sport name meaning "every sport"
pub const ALL_SPORTS: &str = "all";

/// Which stat records an achievement's criteria are evaluated against
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SportScope {
    /// Every record, regardless of sport
    #[default]
    All,
    /// Only records of one sport
    Sport(String),
}

impl SportScope {
    /// Build a scope from an optional sport name; missing, empty or `"all"` means every sport
    pub fn from_sport(sport: Option<&str>) -> Self {
        match sport.map(str::trim) {
            None | Some("") => SportScope::All,
            Some(s) if s.eq_ignore_ascii_case(ALL_SPORTS) => SportScope::All,
            Some(s) => SportScope::Sport(s.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SportScope::All)
    }

    /// Whether a record of `sport` falls inside this scope
    pub fn includes(&self, sport: &str) -> bool {
        match self {
            SportScope::All => true,
            SportScope::Sport(s) => s.eq_ignore_ascii_case(sport.trim()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SportScope::All => ALL_SPORTS,
            SportScope::Sport(s) => s,
        }
    }
}

impl fmt::Display for SportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SportScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Rarity tier shown alongside an achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl FromStr for Rarity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" => Ok(Rarity::Common),
            "uncommon" => Ok(Rarity::Uncommon),
            "rare" => Ok(Rarity::Rare),
            "epic" => Ok(Rarity::Epic),
            "legendary" => Ok(Rarity::Legendary),
            _ => Err(CoreError::UnknownRarity(s.to_string())),
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        };
        f.write_str(name)
    }
}

/// An achievement definition from the catalog
///
/// Achievements are created when the catalog is seeded and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: AchievementId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub sport: SportScope,
    pub criteria: Criteria,
    pub rarity: Rarity,
    pub points: i32,
}

impl Achievement {
    /// Create an achievement scoped to every sport
    pub fn new(id: impl Into<String>, name: impl Into<String>, criteria: Criteria) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category: "general".to_string(),
            sport: SportScope::All,
            criteria,
            rarity: Rarity::Common,
            points: 0,
        }
    }

    pub fn with_sport(mut self, sport: &str) -> Self {
        self.sport = SportScope::from_sport(Some(sport));
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_points(mut self, points: i32) -> Self {
        self.points = points;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether this achievement survives a catalog pre-filter on `sport_hint`.
    ///
    /// No hint (or an empty / "all" hint) keeps everything; otherwise
    /// wildcard-scoped achievements and achievements of the hinted sport are kept.
    pub fn matches_sport_hint(&self, sport_hint: Option<&str>) -> bool {
        match SportScope::from_sport(sport_hint) {
            SportScope::All => true,
            SportScope::Sport(hint) => self.sport.is_all() || self.sport.includes(&hint),
        }
    }
}
