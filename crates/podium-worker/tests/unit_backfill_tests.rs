//! Backfill runs against in-memory collaborators

use async_trait::async_trait;
use podium_core::SportStat;
use podium_repository::{
    MemoryAwardStore, MemoryCatalog, MemoryStatsProvider, RepositoryError, RepositoryResult,
    StatsProvider,
};
use podium_sdk::AchievementEngineBuilder;
use podium_worker::{run_backfill, LogPublisher};
use std::sync::Arc;

const CATALOG: &str = r#"
achievements:
  - id: winner
    name: Winner
    points: 10
    criteria:
      type: stat_total
      field: wins
      operator: ">="
      value: 10
  - id: sharpshooter
    name: Sharpshooter
    sport: football
    points: 5
    criteria:
      type: stat_threshold
      field: goalsScored
      operator: ">="
      value: 20
"#;

fn record(user_id: &str, sport: &str, wins: i64, goals: i64) -> SportStat {
    let mut stat = SportStat::new(user_id, sport);
    stat.wins = wins;
    stat.goals_scored = goals;
    stat
}

/// Stats provider that fails for one user
struct PartlyFailingStats {
    inner: MemoryStatsProvider,
    broken_user: &'static str,
}

#[async_trait]
impl StatsProvider for PartlyFailingStats {
    async fn aggregated_stats(&self, user_id: &str) -> RepositoryResult<Vec<SportStat>> {
        if user_id == self.broken_user {
            return Err(RepositoryError::Unavailable("shard offline".to_string()));
        }
        self.inner.aggregated_stats(user_id).await
    }
}

#[tokio::test]
async fn test_backfill_awards_every_user() {
    let stats = Arc::new(MemoryStatsProvider::new());
    stats.upsert(record("u1", "football", 12, 25)).await;
    stats.upsert(record("u2", "tennis", 10, 0)).await;
    stats.upsert(record("u3", "football", 1, 1)).await;
    let awards = Arc::new(MemoryAwardStore::new());

    let engine = AchievementEngineBuilder::new()
        .with_catalog(Arc::new(
            MemoryCatalog::from_yaml(CATALOG, podium_parser::ParseMode::Strict).unwrap(),
        ))
        .with_stats_provider(stats.clone())
        .with_award_store(awards.clone())
        .with_publisher(Arc::new(LogPublisher))
        .build()
        .await
        .unwrap();
    let engine = Arc::new(engine);

    let summary = run_backfill(engine.clone(), stats.user_ids().await, None, 2).await;
    assert!(summary.is_success());
    assert_eq!(summary.users, 3);
    assert_eq!(summary.awarded, 3);
    assert_eq!(summary.points, 25);
    assert_eq!(awards.len().await, 3);

    // Nothing left to award on a second run
    let summary = run_backfill(engine, stats.user_ids().await, None, 2).await;
    assert_eq!(summary.awarded, 0);
}

#[tokio::test]
async fn test_backfill_continues_after_failure() {
    let inner = MemoryStatsProvider::new();
    inner.upsert(record("u1", "football", 12, 0)).await;
    inner.upsert(record("u2", "football", 12, 0)).await;
    let stats = Arc::new(PartlyFailingStats {
        inner,
        broken_user: "u1",
    });

    let engine = AchievementEngineBuilder::new()
        .with_catalog(Arc::new(
            MemoryCatalog::from_yaml(CATALOG, podium_parser::ParseMode::Strict).unwrap(),
        ))
        .with_stats_provider(stats)
        .with_award_store(Arc::new(MemoryAwardStore::new()))
        .build()
        .await
        .unwrap();

    let summary = run_backfill(
        Arc::new(engine),
        vec!["u1".to_string(), "u2".to_string()],
        None,
        0,
    )
    .await;

    assert!(!summary.is_success());
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].user_id, "u1");
    assert!(summary.failures[0].error.contains("shard offline"));
    assert_eq!(summary.awarded, 1);
}
