//! Report and payload types for AchievementEngine

use chrono::{DateTime, Utc};
use podium_core::{Achievement, AchievementId, AwardRecord, UserId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Notification payload published for every new award
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementAwarded {
    pub user_id: UserId,
    pub achievement_id: AchievementId,
    pub name: String,
    pub points: i32,
    pub earned_at: DateTime<Utc>,
}

impl AchievementAwarded {
    pub fn new(achievement: &Achievement, record: &AwardRecord) -> Self {
        Self {
            user_id: record.user_id.clone(),
            achievement_id: achievement.id.clone(),
            name: achievement.name.clone(),
            points: achievement.points,
            earned_at: record.earned_at,
        }
    }
}

/// Outcome of one evaluation pass
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub user_id: UserId,
    /// Achievements returned by the catalog for this pass
    pub candidates: usize,
    /// Candidates skipped because the user already holds them
    pub already_earned: usize,
    /// Ids whose criteria held, in catalog order
    pub qualified: Vec<AchievementId>,
    /// Achievements newly awarded by this pass
    pub awarded: Vec<Achievement>,
    /// Qualified achievements another pass awarded first
    pub raced: Vec<AchievementId>,
    pub duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            candidates: 0,
            already_earned: 0,
            qualified: Vec::new(),
            awarded: Vec::new(),
            raced: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Total points earned in this pass
    pub fn points(&self) -> i64 {
        self.awarded.iter().map(|a| i64::from(a.points)).sum()
    }

    pub fn awarded_ids(&self) -> Vec<&str> {
        self.awarded.iter().map(|a| a.id.as_str()).collect()
    }
}
