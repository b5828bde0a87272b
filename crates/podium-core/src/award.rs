//! Award records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identifier
pub type UserId = String;

/// The immutable record that a user has earned an achievement.
/// At most one exists per (user, achievement) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardRecord {
    pub user_id: UserId,
    pub achievement_id: String,
    pub earned_at: DateTime<Utc>,
}

impl AwardRecord {
    pub fn new(user_id: impl Into<String>, achievement_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            achievement_id: achievement_id.into(),
            earned_at: Utc::now(),
        }
    }
}

/// Result of attempting to persist an award
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AwardOutcome {
    /// This call created the record
    Awarded(AwardRecord),
    /// A record for the pair already existed
    AlreadyAwarded,
}

impl AwardOutcome {
    pub fn is_awarded(&self) -> bool {
        matches!(self, AwardOutcome::Awarded(_))
    }
}
