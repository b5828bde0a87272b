//! Evaluation of parsed catalogs against stat records

use podium_core::{Achievement, SportStat};
use podium_parser::{CatalogParser, CriteriaParser, ParseMode};
use podium_runtime::CriteriaEvaluator;

const CATALOG: &str = r#"
achievements:
  - id: winner
    name: Winner
    sport: all
    points: 10
    criteria:
      type: stat_total
      field: wins
      operator: gte
      value: 10
  - id: rising_star
    name: Rising Star
    points: 25
    criteria:
      type: stat_threshold
      field: elo
      operator: ">="
      value: 1200
  - id: elite_performer
    name: Elite Performer
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
  - id: football_comeback
    name: Comeback Kid
    sport: football
    criteria:
      type: composite
      logic: OR
      conditions:
        - type: streak
          streakType: losing
          operator: gte
          value: 5
        - type: mystery_rule
          field: wins
"#;

fn football_record() -> SportStat {
    let mut stat = SportStat::new("user-1", "football");
    stat.wins = 12;
    stat.matches_played = 15;
    stat.elo = 1250.0;
    stat.streak = 3;
    stat
}

fn qualified(catalog: &[Achievement], stats: &[SportStat]) -> Vec<String> {
    catalog
        .iter()
        .filter(|a| CriteriaEvaluator::evaluate(&a.criteria, stats, &a.sport))
        .map(|a| a.id.clone())
        .collect()
}

#[test]
fn test_seed_scenario() {
    let catalog = CatalogParser::parse(CATALOG, ParseMode::Lenient).unwrap();
    let stats = vec![football_record()];

    assert_eq!(qualified(&catalog, &stats), vec!["winner", "rising_star"]);
}

#[test]
fn test_elite_performer_after_fifty_matches() {
    let catalog = CatalogParser::parse(CATALOG, ParseMode::Lenient).unwrap();
    let mut stat = football_record();
    stat.matches_played = 60;
    stat.wins = 48;

    assert_eq!(
        qualified(&catalog, &[stat]),
        vec!["winner", "rising_star", "elite_performer"]
    );
}

#[test]
fn test_lenient_catalog_keeps_valid_branch() {
    let catalog = CatalogParser::parse(CATALOG, ParseMode::Lenient).unwrap();
    let mut stat = football_record();
    stat.streak = -6;

    assert!(qualified(&catalog, &[stat.clone()]).contains(&"football_comeback".to_string()));

    stat.sport = "tennis".to_string();
    assert!(!qualified(&catalog, &[stat]).contains(&"football_comeback".to_string()));
}

#[test]
fn test_strict_catalog_rejects_unknown_type() {
    assert!(CatalogParser::parse(CATALOG, ParseMode::Strict).is_err());
}

#[test]
fn test_stat_total_across_sports() {
    let criteria = CriteriaParser::parse(
        r#"
type: stat_total
field: wins
operator: ">="
value: 10
"#,
    )
    .unwrap();

    let mut football = SportStat::new("user-1", "football");
    football.wins = 7;
    let mut tennis = SportStat::new("user-1", "tennis");
    tennis.wins = 3;

    let scope = Default::default();
    assert!(CriteriaEvaluator::evaluate(
        &criteria,
        &[football.clone(), tennis.clone()],
        &scope
    ));

    tennis.wins = 2;
    assert!(!CriteriaEvaluator::evaluate(&criteria, &[football, tennis], &scope));
}
