//! Criteria parser
//!
//! Parses criteria nodes into [`Criteria`] trees:
//!
//! ```yaml
//! type: stat_total
//! field: wins
//! operator: ">="
//! value: 10
//! ```

use crate::error::{ParseError, Result};
use crate::yaml_parser::YamlParser;
use crate::ParseMode;
use podium_core::{CompositeLogic, Criteria, Operator, StatField, StreakType};
use serde_yaml::Value as YamlValue;

/// Criteria parser
pub struct CriteriaParser;

impl CriteriaParser {
    /// Parse a criteria tree from a YAML (or JSON) string, failing on any malformed node
    pub fn parse(yaml_str: &str) -> Result<Criteria> {
        let yaml = YamlParser::parse(yaml_str)?;
        Self::parse_from_yaml(&yaml)
    }

    /// Parse a criteria tree, failing on any malformed node
    pub fn parse_from_yaml(yaml: &YamlValue) -> Result<Criteria> {
        Self::parse_node(yaml, ParseMode::Strict)
    }

    /// Parse a criteria tree, replacing malformed nodes with `Criteria::Invalid`.
    ///
    /// Only the offending node is replaced; well-formed siblings inside a
    /// composite are kept.
    pub fn parse_lenient(yaml: &YamlValue) -> Criteria {
        Self::parse_node(yaml, ParseMode::Lenient).unwrap_or_else(|e| Self::invalid_node(yaml, &e))
    }

    /// Parse a criteria tree with the given mode
    pub fn parse_with_mode(yaml: &YamlValue, mode: ParseMode) -> Result<Criteria> {
        match mode {
            ParseMode::Strict => Self::parse_from_yaml(yaml),
            ParseMode::Lenient => Ok(Self::parse_lenient(yaml)),
        }
    }

    /// Parse a criteria tree stored as JSON
    pub fn parse_json(value: &serde_json::Value, mode: ParseMode) -> Result<Criteria> {
        let yaml = YamlParser::from_json(value)?;
        Self::parse_with_mode(&yaml, mode)
    }

    fn parse_node(yaml: &YamlValue, mode: ParseMode) -> Result<Criteria> {
        if !yaml.is_mapping() {
            return Err(ParseError::InvalidValue {
                field: "criteria".to_string(),
                message: "criteria node must be a mapping".to_string(),
            });
        }

        let kind = YamlParser::get_string(yaml, "type")?;

        match kind.trim().to_ascii_lowercase().as_str() {
            "stat_threshold" | "threshold" => Ok(Criteria::StatThreshold {
                field: Self::parse_field(yaml, "field")?,
                operator: Self::parse_operator(yaml)?,
                value: YamlParser::get_number(yaml, "value")?,
            }),
            "stat_total" | "total" => Ok(Criteria::StatTotal {
                field: Self::parse_field(yaml, "field")?,
                operator: Self::parse_operator(yaml)?,
                value: YamlParser::get_number(yaml, "value")?,
            }),
            "ratio" => Ok(Criteria::Ratio {
                numerator: Self::parse_field(yaml, "numerator")?,
                denominator: Self::parse_field(yaml, "denominator")?,
                operator: Self::parse_operator(yaml)?,
                value: YamlParser::get_number(yaml, "value")?,
            }),
            "streak" => Ok(Criteria::Streak {
                streak_type: Self::parse_streak_type(yaml)?,
                operator: Self::parse_operator(yaml)?,
                value: YamlParser::get_number(yaml, "value")?,
            }),
            "composite" => Self::parse_composite(yaml, mode),
            _ => Err(ParseError::UnknownCriteriaType(kind)),
        }
    }

    fn parse_composite(yaml: &YamlValue, mode: ParseMode) -> Result<Criteria> {
        let logic = match YamlParser::get_optional_string(yaml, "logic") {
            Some(raw) => raw.parse::<CompositeLogic>().map_err(|e| ParseError::InvalidValue {
                field: "logic".to_string(),
                message: e.to_string(),
            })?,
            None => CompositeLogic::default(),
        };

        let children = YamlParser::get_array(yaml, "conditions")?;

        let conditions = match mode {
            ParseMode::Strict => children
                .iter()
                .map(|child| Self::parse_node(child, mode))
                .collect::<Result<Vec<_>>>()?,
            ParseMode::Lenient => children.iter().map(Self::parse_lenient).collect(),
        };

        Ok(Criteria::Composite { logic, conditions })
    }

    fn parse_field(yaml: &YamlValue, key: &str) -> Result<StatField> {
        let name = YamlParser::get_non_empty_string(yaml, key)?;
        Ok(StatField::from_name(&name))
    }

    fn parse_operator(yaml: &YamlValue) -> Result<Operator> {
        let raw = YamlParser::get_string(yaml, "operator")?;
        raw.parse::<Operator>()
            .map_err(|_| ParseError::InvalidOperator(raw))
    }

    fn parse_streak_type(yaml: &YamlValue) -> Result<StreakType> {
        let raw = YamlParser::get_string_any(yaml, &["streakType", "streak_type"])?;
        raw.parse::<StreakType>().map_err(|e| ParseError::InvalidValue {
            field: "streakType".to_string(),
            message: e.to_string(),
        })
    }

    fn invalid_node(yaml: &YamlValue, error: &ParseError) -> Criteria {
        let kind = YamlParser::get_optional_string(yaml, "type").unwrap_or_else(|| "unknown".to_string());
        log::warn!("Malformed criteria node '{}' loaded as invalid: {}", kind, error);
        Criteria::invalid(kind, error.to_string())
    }
}
