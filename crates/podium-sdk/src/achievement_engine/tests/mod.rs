//! Unit tests for AchievementEngine

use super::*;
use crate::builder::AchievementEngineBuilder;
use crate::config::EngineConfig;
use podium_core::{Achievement, AwardRecord, Criteria, Operator, SportStat};
use podium_repository::{AwardStore, MemoryAwardStore, MemoryPublisher, MemoryStatsProvider};
use std::collections::HashSet;
use std::sync::Arc;

fn catalog() -> Vec<Achievement> {
    vec![
        Achievement::new("winner", "Winner", Criteria::total("wins", Operator::Ge, 10.0))
            .with_points(10),
        Achievement::new(
            "rising_star",
            "Rising Star",
            Criteria::threshold("elo", Operator::Ge, 1200.0),
        )
        .with_points(25),
        Achievement::new(
            "goal_machine",
            "Goal Machine",
            Criteria::threshold("goalsScored", Operator::Ge, 100.0),
        )
        .with_sport("football"),
    ]
}

fn stat(wins: i64, elo: f64) -> SportStat {
    let mut stat = SportStat::new("u1", "football");
    stat.wins = wins;
    stat.elo = elo;
    stat
}

#[test]
fn test_qualifying_skips_earned() {
    let catalog = catalog();
    let stats = vec![stat(12, 1250.0)];

    let none_earned = HashSet::new();
    let ids: Vec<&str> = AchievementEngine::qualifying(&catalog, &none_earned, &stats)
        .into_iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(ids, vec!["winner", "rising_star"]);

    let earned: HashSet<String> = ["winner".to_string()].into_iter().collect();
    let ids: Vec<&str> = AchievementEngine::qualifying(&catalog, &earned, &stats)
        .into_iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(ids, vec!["rising_star"]);
}

#[test]
fn test_award_payload_shape() {
    let achievement = &catalog()[1];
    let record = AwardRecord::new("u1", "rising_star");

    let payload = serde_json::to_value(AchievementAwarded::new(achievement, &record)).unwrap();
    assert_eq!(payload["userId"], "u1");
    assert_eq!(payload["achievementId"], "rising_star");
    assert_eq!(payload["name"], "Rising Star");
    assert_eq!(payload["points"], 25);
    assert!(payload["earnedAt"].is_string());
}

#[tokio::test]
async fn test_report_counts() {
    let stats = Arc::new(MemoryStatsProvider::new());
    stats.upsert(stat(12, 1250.0)).await;
    let awards = Arc::new(MemoryAwardStore::new());
    awards.award("u1", "winner").await.unwrap();

    let engine = AchievementEngineBuilder::new()
        .with_catalog(Arc::new(podium_repository::MemoryCatalog::new(catalog())))
        .with_stats_provider(stats)
        .with_award_store(awards)
        .build()
        .await
        .unwrap();

    let report = engine.evaluate_for_user_with_report("u1", None).await.unwrap();
    assert_eq!(report.user_id, "u1");
    assert_eq!(report.candidates, 3);
    assert_eq!(report.already_earned, 1);
    assert_eq!(report.qualified, vec!["rising_star"]);
    assert_eq!(report.awarded_ids(), vec!["rising_star"]);
    assert_eq!(report.points(), 25);
    assert!(report.raced.is_empty());
}

#[tokio::test]
async fn test_publish_disabled() {
    let stats = Arc::new(MemoryStatsProvider::new());
    stats.upsert(stat(12, 900.0)).await;
    let publisher = Arc::new(MemoryPublisher::new());

    let engine = AchievementEngineBuilder::new()
        .with_config(EngineConfig::new().publish_events(false))
        .with_catalog(Arc::new(podium_repository::MemoryCatalog::new(catalog())))
        .with_stats_provider(stats)
        .with_award_store(Arc::new(MemoryAwardStore::new()))
        .with_publisher(publisher.clone())
        .build()
        .await
        .unwrap();

    let awarded = engine.evaluate_for_user("u1", None).await.unwrap();
    assert_eq!(awarded.len(), 1);
    assert!(publisher.events().await.is_empty());
}

#[tokio::test]
async fn test_custom_topic() {
    let stats = Arc::new(MemoryStatsProvider::new());
    stats.upsert(stat(12, 900.0)).await;
    let publisher = Arc::new(MemoryPublisher::new());

    let engine = AchievementEngineBuilder::new()
        .with_publish_topic("podium.awards")
        .with_catalog(Arc::new(podium_repository::MemoryCatalog::new(catalog())))
        .with_stats_provider(stats)
        .with_award_store(Arc::new(MemoryAwardStore::new()))
        .with_publisher(publisher.clone())
        .build()
        .await
        .unwrap();

    engine.evaluate_for_user("u1", None).await.unwrap();
    assert_eq!(publisher.events_on("podium.awards").await.len(), 1);
    assert!(publisher.events_on("achievement.awarded").await.is_empty());
}
