//! Collaborator traits consumed by the achievement engine
//!
//! Each trait covers one external concern:
//!
//! - [`StatsProvider`]: per-sport aggregated stats for a user
//! - [`AchievementCatalog`]: the achievement definitions
//! - [`AwardStore`]: earned achievements, with a (user, achievement) uniqueness guarantee
//! - [`EventPublisher`]: outbound notifications
//!
//! All traits are object safe and used as `Arc<dyn Trait>`.

use async_trait::async_trait;
use podium_core::{Achievement, AchievementId, AwardOutcome, SportStat};
use std::collections::HashSet;

use crate::RepositoryResult;

/// Source of aggregated per-sport statistics
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// All stat records for a user, one per sport played
    async fn aggregated_stats(&self, user_id: &str) -> RepositoryResult<Vec<SportStat>>;
}

/// Source of achievement definitions
#[async_trait]
pub trait AchievementCatalog: Send + Sync {
    /// List achievements
    ///
    /// With `Some(sport)` only achievements scoped to that sport or to all
    /// sports are returned. With `None` the whole catalog is returned.
    async fn list(&self, sport_filter: Option<&str>) -> RepositoryResult<Vec<Achievement>>;
}

/// Persistence for earned achievements
#[async_trait]
pub trait AwardStore: Send + Sync {
    /// Ids of every achievement the user has already earned
    async fn list_earned_ids(&self, user_id: &str) -> RepositoryResult<HashSet<AchievementId>>;

    /// Record an award
    ///
    /// Implementations must be atomic: of any number of concurrent calls for
    /// the same pair, exactly one returns [`AwardOutcome::Awarded`] and the
    /// rest return [`AwardOutcome::AlreadyAwarded`].
    async fn award(&self, user_id: &str, achievement_id: &str) -> RepositoryResult<AwardOutcome>;
}

/// Outbound event sink
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a JSON payload on a topic
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> RepositoryResult<()>;
}
