//! Unit tests for Podium core types

use podium_core::*;

// =============================================================================
// Criteria construction
// =============================================================================

#[test]
fn test_build_catalog_criteria() {
    let winner = Criteria::total("wins", Operator::Ge, 10.0);
    let rising_star = Criteria::threshold("elo", Operator::Ge, 1200.0);
    let elite = Criteria::all(vec![
        Criteria::ratio("wins", "matchesPlayed", Operator::Ge, 0.75),
        Criteria::threshold("matchesPlayed", Operator::Ge, 50.0),
    ]);

    assert_eq!(winner.kind(), "stat_total");
    assert_eq!(rising_star.kind(), "stat_threshold");
    assert_eq!(elite.kind(), "composite");

    if let Criteria::Composite { logic, conditions } = &elite {
        assert_eq!(*logic, CompositeLogic::And);
        assert_eq!(conditions.len(), 2);
    } else {
        panic!("Expected composite criteria");
    }
}

#[test]
fn test_invalid_criteria_kind() {
    let criteria = Criteria::invalid("percentile", "Unknown criteria type: percentile");
    assert_eq!(criteria.kind(), "percentile");
    assert!(!criteria.is_well_formed());
    assert!(criteria.referenced_fields().is_empty());
}

#[test]
fn test_streak_criteria_has_no_fields() {
    let criteria = Criteria::streak(StreakType::Winning, Operator::Ge, 3.0);
    assert!(criteria.referenced_fields().is_empty());
    assert!(criteria.is_well_formed());
}

// =============================================================================
// Achievements
// =============================================================================

#[test]
fn test_achievement_defaults() {
    let achievement = Achievement::new(
        "rising_star",
        "Rising Star",
        Criteria::threshold("elo", Operator::Ge, 1200.0),
    );

    assert_eq!(achievement.sport, SportScope::All);
    assert_eq!(achievement.rarity, Rarity::Common);
    assert_eq!(achievement.category, "general");
    assert_eq!(achievement.points, 0);
    assert!(achievement.description.is_none());
}

#[test]
fn test_achievement_builder() {
    let achievement = Achievement::new(
        "hat_trick_hero",
        "Hat-trick Hero",
        Criteria::threshold("goals", Operator::Ge, 3.0),
    )
    .with_sport("football")
    .with_category("scoring")
    .with_rarity(Rarity::Epic)
    .with_points(100)
    .with_description("Score three goals");

    assert_eq!(achievement.sport, SportScope::Sport("football".to_string()));
    assert_eq!(achievement.category, "scoring");
    assert_eq!(achievement.rarity, Rarity::Epic);
    assert_eq!(achievement.points, 100);
    assert_eq!(achievement.description.as_deref(), Some("Score three goals"));
}

#[test]
fn test_achievement_with_all_sport_is_wildcard() {
    let achievement = Achievement::new("a", "A", Criteria::all(vec![])).with_sport("All");
    assert!(achievement.sport.is_all());
}

// =============================================================================
// Awards
// =============================================================================

#[test]
fn test_award_record_serde() {
    let record = AwardRecord::new("user-1", "winner");
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["userId"], "user-1");
    assert_eq!(json["achievementId"], "winner");
    assert!(json.get("earnedAt").is_some());

    let decoded: AwardRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn test_award_outcome() {
    assert!(AwardOutcome::Awarded(AwardRecord::new("u", "a")).is_awarded());
    assert!(!AwardOutcome::AlreadyAwarded.is_awarded());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_core_error_display() {
    assert_eq!(
        CoreError::UnknownStreakType("sideways".to_string()).to_string(),
        "Unknown streak type: sideways"
    );
    assert_eq!(
        CoreError::UnknownLogic("XOR".to_string()).to_string(),
        "Unknown composite logic: XOR"
    );
    assert_eq!(
        CoreError::UnknownRarity("mythic".to_string()).to_string(),
        "Unknown rarity: mythic"
    );
}
