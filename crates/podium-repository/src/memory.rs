//! In-memory collaborators
//!
//! Used by tests, demos and single-process deployments. All state sits
//! behind `tokio::sync::RwLock` so instances can be shared as `Arc<dyn Trait>`.

use async_trait::async_trait;
use podium_core::{Achievement, AchievementId, AwardOutcome, AwardRecord, SportStat, UserId};
use podium_parser::{CatalogParser, ParseMode};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

use crate::traits::{AchievementCatalog, AwardStore, StatsProvider};
use crate::validation::inspect_catalog;
use crate::RepositoryResult;

/// Catalog held in memory
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    achievements: RwLock<Vec<Achievement>>,
}

impl MemoryCatalog {
    /// Create a catalog from a list of achievements
    pub fn new(achievements: Vec<Achievement>) -> Self {
        Self {
            achievements: RwLock::new(achievements),
        }
    }

    /// Create a catalog from a YAML catalog document
    pub fn from_yaml(yaml: &str, mode: ParseMode) -> RepositoryResult<Self> {
        let achievements = CatalogParser::parse(yaml, mode)?;
        inspect_catalog("memory", &achievements);
        Ok(Self::new(achievements))
    }

    /// Add an achievement, replacing any existing one with the same id
    pub async fn insert(&self, achievement: Achievement) {
        let mut achievements = self.achievements.write().await;
        achievements.retain(|a| a.id != achievement.id);
        achievements.push(achievement);
    }

    /// Number of achievements in the catalog
    pub async fn len(&self) -> usize {
        self.achievements.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.achievements.read().await.is_empty()
    }
}

#[async_trait]
impl AchievementCatalog for MemoryCatalog {
    async fn list(&self, sport_filter: Option<&str>) -> RepositoryResult<Vec<Achievement>> {
        let achievements = self.achievements.read().await;
        Ok(achievements
            .iter()
            .filter(|a| a.matches_sport_hint(sport_filter))
            .cloned()
            .collect())
    }
}

/// Stats provider held in memory, keyed by user
#[derive(Debug, Default)]
pub struct MemoryStatsProvider {
    stats: RwLock<HashMap<UserId, Vec<SportStat>>>,
}

impl MemoryStatsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for the stat's (user, sport) pair
    pub async fn upsert(&self, stat: SportStat) {
        let mut stats = self.stats.write().await;
        let records = stats.entry(stat.user_id.clone()).or_default();
        match records.iter_mut().find(|r| r.is_sport(&stat.sport)) {
            Some(existing) => *existing = stat,
            None => records.push(stat),
        }
    }

    /// Users that have at least one stat record, sorted
    pub async fn user_ids(&self) -> Vec<UserId> {
        let stats = self.stats.read().await;
        let mut ids: Vec<UserId> = stats.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[async_trait]
impl StatsProvider for MemoryStatsProvider {
    async fn aggregated_stats(&self, user_id: &str) -> RepositoryResult<Vec<SportStat>> {
        let stats = self.stats.read().await;
        Ok(stats.get(user_id).cloned().unwrap_or_default())
    }
}

/// Award store held in memory
///
/// `award` checks and inserts under a single write lock, so the
/// (user, achievement) pair is unique even under concurrent callers.
#[derive(Debug, Default)]
pub struct MemoryAwardStore {
    awards: RwLock<HashMap<UserId, HashMap<AchievementId, AwardRecord>>>,
}

impl MemoryAwardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All award records for a user, oldest first
    pub async fn records_for(&self, user_id: &str) -> Vec<AwardRecord> {
        let awards = self.awards.read().await;
        let mut records: Vec<AwardRecord> = awards
            .get(user_id)
            .map(|by_id| by_id.values().cloned().collect())
            .unwrap_or_default();
        records.sort_by(|a, b| {
            a.earned_at
                .cmp(&b.earned_at)
                .then_with(|| a.achievement_id.cmp(&b.achievement_id))
        });
        records
    }

    /// Total number of award records across all users
    pub async fn len(&self) -> usize {
        let awards = self.awards.read().await;
        awards.values().map(HashMap::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AwardStore for MemoryAwardStore {
    async fn list_earned_ids(&self, user_id: &str) -> RepositoryResult<HashSet<AchievementId>> {
        let awards = self.awards.read().await;
        Ok(awards
            .get(user_id)
            .map(|by_id| by_id.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn award(&self, user_id: &str, achievement_id: &str) -> RepositoryResult<AwardOutcome> {
        let mut awards = self.awards.write().await;
        let by_id = awards.entry(user_id.to_string()).or_default();

        if by_id.contains_key(achievement_id) {
            tracing::debug!(user_id, achievement_id, "award already recorded");
            return Ok(AwardOutcome::AlreadyAwarded);
        }

        let record = AwardRecord::new(user_id, achievement_id);
        by_id.insert(achievement_id.to_string(), record.clone());
        Ok(AwardOutcome::Awarded(record))
    }
}
