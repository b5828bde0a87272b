//! Achievement catalog parser
//!
//! Parses catalog documents into [`Achievement`] definitions. A document may
//! hold a list of achievements, a single achievement, or several `---`
//! separated documents:
//!
//! ```yaml
//! achievements:
//!   - id: winner
//!     name: Winner
//!     category: milestones
//!     sport: all
//!     rarity: common
//!     points: 10
//!     criteria:
//!       type: stat_total
//!       field: wins
//!       operator: ">="
//!       value: 10
//! ```

use crate::criteria_parser::CriteriaParser;
use crate::error::{ParseError, Result};
use crate::yaml_parser::YamlParser;
use crate::ParseMode;
use podium_core::{Achievement, Criteria, Rarity, SportScope};
use serde_yaml::Value as YamlValue;
use std::collections::HashSet;

/// Catalog parser
pub struct CatalogParser;

impl CatalogParser {
    /// Parse every achievement in a catalog string
    ///
    /// Achievement ids must be unique across all documents in the string.
    pub fn parse(yaml_str: &str, mode: ParseMode) -> Result<Vec<Achievement>> {
        let documents = YamlParser::parse_multi_document(yaml_str)?;

        let mut achievements = Vec::new();
        let mut seen = HashSet::new();

        for document in documents.iter().filter(|d| !d.is_null()) {
            for achievement in Self::parse_document(document, mode)? {
                if !seen.insert(achievement.id.clone()) {
                    return Err(ParseError::DuplicateId(achievement.id));
                }
                achievements.push(achievement);
            }
        }

        Ok(achievements)
    }

    fn parse_document(document: &YamlValue, mode: ParseMode) -> Result<Vec<Achievement>> {
        if let Some(list) = document.get("achievements") {
            let items = list.as_sequence().ok_or_else(|| ParseError::InvalidValue {
                field: "achievements".to_string(),
                message: "expected a list".to_string(),
            })?;
            return items
                .iter()
                .map(|item| Self::parse_achievement(item, mode))
                .collect();
        }

        if let Some(single) = document.get("achievement") {
            return Ok(vec![Self::parse_achievement(single, mode)?]);
        }

        if document.get("id").is_some() {
            return Ok(vec![Self::parse_achievement(document, mode)?]);
        }

        Err(ParseError::MissingField {
            field: "achievements".to_string(),
        })
    }

    /// Parse a single achievement definition
    ///
    /// Identity fields (`id`, `name`) are always required. In lenient mode a
    /// malformed or missing `criteria` becomes `Criteria::Invalid` and an
    /// unknown rarity falls back to common.
    pub fn parse_achievement(yaml: &YamlValue, mode: ParseMode) -> Result<Achievement> {
        let id = YamlParser::get_non_empty_string(yaml, "id")?;
        let name = YamlParser::get_non_empty_string(yaml, "name")?;
        let description = YamlParser::get_optional_string(yaml, "description");
        let category = YamlParser::get_optional_string(yaml, "category")
            .unwrap_or_else(|| "general".to_string());
        let sport = SportScope::from_sport(YamlParser::get_optional_string(yaml, "sport").as_deref());
        let points = match (Self::parse_points(yaml), mode) {
            (Ok(points), _) => points.unwrap_or(0),
            (Err(e), ParseMode::Strict) => return Err(e),
            (Err(e), ParseMode::Lenient) => {
                log::warn!("Achievement '{}': {}, using 0 points", id, e);
                0
            }
        };

        let rarity = match YamlParser::get_optional_string(yaml, "rarity") {
            None => Rarity::default(),
            Some(raw) => match (raw.parse::<Rarity>(), mode) {
                (Ok(rarity), _) => rarity,
                (Err(e), ParseMode::Strict) => {
                    return Err(ParseError::InvalidValue {
                        field: "rarity".to_string(),
                        message: e.to_string(),
                    })
                }
                (Err(e), ParseMode::Lenient) => {
                    log::warn!("Achievement '{}': {}, using common", id, e);
                    Rarity::default()
                }
            },
        };

        let criteria = match (yaml.get("criteria"), mode) {
            (Some(node), mode) => CriteriaParser::parse_with_mode(node, mode)?,
            (None, ParseMode::Strict) => {
                return Err(ParseError::MissingField {
                    field: "criteria".to_string(),
                })
            }
            (None, ParseMode::Lenient) => {
                log::warn!("Achievement '{}' has no criteria, it can never be awarded", id);
                Criteria::invalid("unknown", "Missing required field: criteria")
            }
        };

        Ok(Achievement {
            id,
            name,
            description,
            category,
            sport,
            criteria,
            rarity,
            points,
        })
    }

    /// Point value under any of its accepted spellings
    fn parse_points(yaml: &YamlValue) -> Result<Option<i32>> {
        for field in ["points", "pointValue", "point_value"] {
            if let Some(points) = YamlParser::get_optional_i32(yaml, field)? {
                return Ok(Some(points));
            }
        }
        Ok(None)
    }
}
