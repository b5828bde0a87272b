//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use podium_core::{Achievement, AchievementId, AwardOutcome, SportStat};
use podium_repository::{
    AchievementCatalog, AwardStore, EventPublisher, MemoryAwardStore, MemoryCatalog,
    MemoryPublisher, MemoryStatsProvider, RepositoryError, RepositoryResult, StatsProvider,
};
use podium_sdk::{AchievementEngine, AchievementEngineBuilder};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const SEED_CATALOG: &str = r#"
achievements:
  - id: winner
    name: Winner
    sport: all
    points: 10
    criteria:
      type: stat_total
      field: wins
      operator: ">="
      value: 10
  - id: rising_star
    name: Rising Star
    sport: all
    points: 25
    criteria:
      type: stat_threshold
      field: elo
      operator: ">="
      value: 1200
  - id: elite_performer
    name: Elite Performer
    sport: all
    rarity: epic
    points: 100
    criteria:
      type: composite
      logic: AND
      conditions:
        - type: ratio
          numerator: wins
          denominator: matchesPlayed
          operator: ">="
          value: 0.75
        - type: stat_threshold
          field: matchesPlayed
          operator: ">="
          value: 50
"#;

/// The stat record from the seed scenario
pub fn football_record(user_id: &str) -> SportStat {
    let mut stat = SportStat::new(user_id, "football");
    stat.wins = 12;
    stat.matches_played = 15;
    stat.elo = 1250.0;
    stat.streak = 3;
    stat
}

/// In-memory collaborators wired into an engine
pub struct TestEngine {
    pub engine: Arc<AchievementEngine>,
    pub catalog: Arc<MemoryCatalog>,
    pub stats: Arc<MemoryStatsProvider>,
    pub awards: Arc<MemoryAwardStore>,
    pub publisher: Arc<MemoryPublisher>,
}

impl TestEngine {
    pub async fn new(catalog_yaml: &str) -> Self {
        let catalog = Arc::new(
            MemoryCatalog::from_yaml(catalog_yaml, podium_parser::ParseMode::Strict).unwrap(),
        );
        let stats = Arc::new(MemoryStatsProvider::new());
        let awards = Arc::new(MemoryAwardStore::new());
        let publisher = Arc::new(MemoryPublisher::new());

        let engine = AchievementEngineBuilder::new()
            .with_catalog(catalog.clone())
            .with_stats_provider(stats.clone())
            .with_award_store(awards.clone())
            .with_publisher(publisher.clone())
            .build()
            .await
            .unwrap();

        Self {
            engine: Arc::new(engine),
            catalog,
            stats,
            awards,
            publisher,
        }
    }

    pub async fn seeded() -> Self {
        Self::new(SEED_CATALOG).await
    }
}

pub fn ids(achievements: &[Achievement]) -> Vec<&str> {
    achievements.iter().map(|a| a.id.as_str()).collect()
}

/// Stats provider that always fails
pub struct FailingStats;

#[async_trait]
impl StatsProvider for FailingStats {
    async fn aggregated_stats(&self, _user_id: &str) -> RepositoryResult<Vec<SportStat>> {
        Err(RepositoryError::Unavailable("stats service down".to_string()))
    }
}

/// Catalog that always fails
pub struct FailingCatalog;

#[async_trait]
impl AchievementCatalog for FailingCatalog {
    async fn list(&self, _sport_filter: Option<&str>) -> RepositoryResult<Vec<Achievement>> {
        Err(RepositoryError::Unavailable("catalog down".to_string()))
    }
}

/// Publisher that always fails
pub struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _topic: &str, _payload: serde_json::Value) -> RepositoryResult<()> {
        Err(RepositoryError::Publish("broker down".to_string()))
    }
}

/// Award store that fails every write after `allowed` successful ones
pub struct FlakyAwardStore {
    inner: MemoryAwardStore,
    allowed: usize,
    writes: AtomicUsize,
}

impl FlakyAwardStore {
    pub fn new(allowed: usize) -> Self {
        Self {
            inner: MemoryAwardStore::new(),
            allowed,
            writes: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn committed(&self, user_id: &str) -> HashSet<AchievementId> {
        self.inner.list_earned_ids(user_id).await.unwrap()
    }
}

#[async_trait]
impl AwardStore for FlakyAwardStore {
    async fn list_earned_ids(&self, user_id: &str) -> RepositoryResult<HashSet<AchievementId>> {
        self.inner.list_earned_ids(user_id).await
    }

    async fn award(&self, user_id: &str, achievement_id: &str) -> RepositoryResult<AwardOutcome> {
        if self.writes.fetch_add(1, Ordering::SeqCst) >= self.allowed {
            return Err(RepositoryError::Other("write rejected".to_string()));
        }
        self.inner.award(user_id, achievement_id).await
    }
}

/// Award store whose earned set cannot be read
pub struct UnreadableAwardStore {
    pub writes: AtomicUsize,
}

#[async_trait]
impl AwardStore for UnreadableAwardStore {
    async fn list_earned_ids(&self, _user_id: &str) -> RepositoryResult<HashSet<AchievementId>> {
        Err(RepositoryError::Unavailable("awards table locked".to_string()))
    }

    async fn award(&self, _user_id: &str, _achievement_id: &str) -> RepositoryResult<AwardOutcome> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(AwardOutcome::AlreadyAwarded)
    }
}
