//! Criteria rule trees
//!
//! A [`Criteria`] is the rule expression attached to an achievement. Leaf
//! nodes compare a stat (or a derived quantity) against a constant; composite
//! nodes combine children with AND/OR. Criteria carry no behavior; evaluation
//! lives in `podium-runtime`.
//!
//! # Wire format
//!
//! ```yaml
//! criteria:
//!   type: composite
//!   logic: AND
//!   conditions:
//!     - type: ratio
//!       numerator: wins
//!       denominator: matchesPlayed
//!       operator: ">="
//!       value: 0.75
//!     - type: stat_threshold
//!       field: matchesPlayed
//!       operator: ">="
//!       value: 50
//! ```

use crate::error::CoreError;
use crate::operator::Operator;
use crate::stats::StatField;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which sign of the streak counter a streak condition looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakType {
    /// Only positive streaks, compared as-is
    Winning,
    /// Only negative streaks, compared by magnitude
    Losing,
    /// Any streak, compared by magnitude
    Any,
}

impl FromStr for StreakType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winning" | "win" => Ok(StreakType::Winning),
            "losing" | "loss" | "lose" => Ok(StreakType::Losing),
            "any" => Ok(StreakType::Any),
            _ => Err(CoreError::UnknownStreakType(s.to_string())),
        }
    }
}

/// Boolean combinator for composite criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompositeLogic {
    #[default]
    And,
    Or,
}

impl FromStr for CompositeLogic {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" | "ALL" => Ok(CompositeLogic::And),
            "OR" | "ANY" => Ok(CompositeLogic::Or),
            _ => Err(CoreError::UnknownLogic(s.to_string())),
        }
    }
}

impl fmt::Display for CompositeLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeLogic::And => f.write_str("AND"),
            CompositeLogic::Or => f.write_str("OR"),
        }
    }
}

/// A node in an achievement's rule tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Criteria {
    /// `record[field] <op> value` for any single in-scope record
    StatThreshold {
        field: StatField,
        operator: Operator,
        value: f64,
    },

    /// `sum(record[field]) <op> value` over all in-scope records
    StatTotal {
        field: StatField,
        operator: Operator,
        value: f64,
    },

    /// `record[numerator] / record[denominator] <op> value` for any single record
    Ratio {
        numerator: StatField,
        denominator: StatField,
        operator: Operator,
        value: f64,
    },

    /// Signed streak counter filtered by `streak_type`
    Streak {
        #[serde(rename = "streakType")]
        streak_type: StreakType,
        operator: Operator,
        value: f64,
    },

    /// Boolean combination of child criteria
    Composite {
        logic: CompositeLogic,
        conditions: Vec<Criteria>,
    },

    /// A node that could not be understood when it was loaded.
    /// Always evaluates to false.
    Invalid { kind: String, reason: String },
}

impl Criteria {
    pub fn threshold(field: impl Into<StatField>, operator: Operator, value: f64) -> Self {
        Criteria::StatThreshold {
            field: field.into(),
            operator,
            value,
        }
    }

    pub fn total(field: impl Into<StatField>, operator: Operator, value: f64) -> Self {
        Criteria::StatTotal {
            field: field.into(),
            operator,
            value,
        }
    }

    pub fn ratio(
        numerator: impl Into<StatField>,
        denominator: impl Into<StatField>,
        operator: Operator,
        value: f64,
    ) -> Self {
        Criteria::Ratio {
            numerator: numerator.into(),
            denominator: denominator.into(),
            operator,
            value,
        }
    }

    pub fn streak(streak_type: StreakType, operator: Operator, value: f64) -> Self {
        Criteria::Streak {
            streak_type,
            operator,
            value,
        }
    }

    /// Composite node requiring every child to hold
    pub fn all(conditions: Vec<Criteria>) -> Self {
        Criteria::Composite {
            logic: CompositeLogic::And,
            conditions,
        }
    }

    /// Composite node requiring at least one child to hold
    pub fn any(conditions: Vec<Criteria>) -> Self {
        Criteria::Composite {
            logic: CompositeLogic::Or,
            conditions,
        }
    }

    pub fn invalid(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Criteria::Invalid {
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Wire name of this node's type
    pub fn kind(&self) -> &str {
        match self {
            Criteria::StatThreshold { .. } => "stat_threshold",
            Criteria::StatTotal { .. } => "stat_total",
            Criteria::Ratio { .. } => "ratio",
            Criteria::Streak { .. } => "streak",
            Criteria::Composite { .. } => "composite",
            Criteria::Invalid { kind, .. } => kind,
        }
    }

    /// Nesting depth; a leaf has depth 1
    pub fn depth(&self) -> usize {
        match self {
            Criteria::Composite { conditions, .. } => {
                1 + conditions.iter().map(Criteria::depth).max().unwrap_or(0)
            }
            _ => 1,
        }
    }

    /// True if no node in the tree is [`Criteria::Invalid`]
    pub fn is_well_formed(&self) -> bool {
        match self {
            Criteria::Invalid { .. } => false,
            Criteria::Composite { conditions, .. } => conditions.iter().all(Criteria::is_well_formed),
            _ => true,
        }
    }

    /// Every stat field referenced anywhere in the tree, in visit order
    pub fn referenced_fields(&self) -> Vec<&StatField> {
        let mut result = Vec::new();
        self.collect_fields(&mut result);
        result
    }

    fn collect_fields<'a>(&'a self, result: &mut Vec<&'a StatField>) {
        match self {
            Criteria::StatThreshold { field, .. } | Criteria::StatTotal { field, .. } => {
                result.push(field)
            }
            Criteria::Ratio {
                numerator,
                denominator,
                ..
            } => {
                result.push(numerator);
                result.push(denominator);
            }
            Criteria::Composite { conditions, .. } => {
                for condition in conditions {
                    condition.collect_fields(result);
                }
            }
            Criteria::Streak { .. } | Criteria::Invalid { .. } => {}
        }
    }
}
