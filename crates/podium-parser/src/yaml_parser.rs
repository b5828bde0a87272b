//! YAML Parser
//!
//! Provides utilities for reading fields out of YAML documents.

use crate::error::{ParseError, Result};
use serde::Deserialize;
use serde_yaml::Value as YamlValue;

/// YAML parser utilities
pub struct YamlParser;

impl YamlParser {
    /// Parse YAML string into a YAML value
    pub fn parse(yaml_str: &str) -> Result<YamlValue> {
        serde_yaml::from_str(yaml_str).map_err(|e| ParseError::ParseError(e.to_string()))
    }

    /// Parse a YAML string containing one or more `---` separated documents
    pub fn parse_multi_document(yaml_str: &str) -> Result<Vec<YamlValue>> {
        let mut documents = Vec::new();

        for document in serde_yaml::Deserializer::from_str(yaml_str) {
            let value = YamlValue::deserialize(document)
                .map_err(|e| ParseError::ParseError(e.to_string()))?;
            documents.push(value);
        }

        Ok(documents)
    }

    /// Convert a JSON value (e.g. a JSONB column) into a YAML value
    pub fn from_json(value: &serde_json::Value) -> Result<YamlValue> {
        Ok(serde_yaml::to_value(value)?)
    }

    /// Get a required string field from YAML object
    pub fn get_string(obj: &YamlValue, field: &str) -> Result<String> {
        obj.get(field)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| ParseError::MissingField {
                field: field.to_string(),
            })
    }

    /// Get an optional string field from YAML object
    pub fn get_optional_string(obj: &YamlValue, field: &str) -> Option<String> {
        obj.get(field)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    /// Get the first present string among several spellings of a field
    pub fn get_string_any(obj: &YamlValue, fields: &[&str]) -> Result<String> {
        fields
            .iter()
            .find_map(|field| Self::get_optional_string(obj, field))
            .ok_or_else(|| ParseError::MissingField {
                field: fields.first().copied().unwrap_or_default().to_string(),
            })
    }

    /// Get a required non-empty string field
    pub fn get_non_empty_string(obj: &YamlValue, field: &str) -> Result<String> {
        let value = Self::get_string(obj, field)?;
        if value.trim().is_empty() {
            return Err(ParseError::InvalidValue {
                field: field.to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(value.trim().to_string())
    }

    /// Get a required finite number. Integers, floats and numeric strings are accepted.
    pub fn get_number(obj: &YamlValue, field: &str) -> Result<f64> {
        let raw = obj.get(field).ok_or_else(|| ParseError::MissingField {
            field: field.to_string(),
        })?;

        let number = match raw {
            YamlValue::Number(n) => n.as_f64(),
            YamlValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match number {
            Some(n) if n.is_finite() => Ok(n),
            _ => Err(ParseError::InvalidValue {
                field: field.to_string(),
                message: format!("expected a finite number, got {:?}", raw),
            }),
        }
    }

    /// Get an optional integer field from YAML object
    ///
    /// Whole-valued floats and numeric strings are accepted. Fractions and
    /// values outside the `i32` range are rejected.
    pub fn get_optional_i32(obj: &YamlValue, field: &str) -> Result<Option<i32>> {
        let Some(raw) = obj.get(field) else {
            return Ok(None);
        };

        let number = match raw {
            YamlValue::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_number)),
            YamlValue::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
            }
            _ => None,
        };

        number
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| ParseError::InvalidValue {
                field: field.to_string(),
                message: format!("expected a 32-bit integer, got {:?}", raw),
            })
    }

    /// Get a required array field from YAML object
    pub fn get_array<'a>(obj: &'a YamlValue, field: &str) -> Result<&'a Vec<YamlValue>> {
        obj.get(field)
            .and_then(|v| v.as_sequence())
            .ok_or_else(|| ParseError::MissingField {
                field: field.to_string(),
            })
    }
}

fn whole_number(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_number_variants() {
        let yaml = YamlParser::parse("a: 10\nb: 0.75\nc: \"12\"\nd: abc\ne: .nan").unwrap();
        assert_eq!(YamlParser::get_number(&yaml, "a").unwrap(), 10.0);
        assert_eq!(YamlParser::get_number(&yaml, "b").unwrap(), 0.75);
        assert_eq!(YamlParser::get_number(&yaml, "c").unwrap(), 12.0);
        assert!(matches!(
            YamlParser::get_number(&yaml, "d"),
            Err(ParseError::InvalidValue { .. })
        ));
        assert!(YamlParser::get_number(&yaml, "e").is_err());
        assert!(matches!(
            YamlParser::get_number(&yaml, "missing"),
            Err(ParseError::MissingField { .. })
        ));
    }

    #[test]
    fn test_get_optional_i32() {
        let yaml = YamlParser::parse(
            "a: 10\nb: 10.0\nc: \"25\"\nd: 3000000000\ne: 2.5\nf: lots\ng: -7",
        )
        .unwrap();
        assert_eq!(YamlParser::get_optional_i32(&yaml, "a").unwrap(), Some(10));
        assert_eq!(YamlParser::get_optional_i32(&yaml, "b").unwrap(), Some(10));
        assert_eq!(YamlParser::get_optional_i32(&yaml, "c").unwrap(), Some(25));
        assert_eq!(YamlParser::get_optional_i32(&yaml, "g").unwrap(), Some(-7));
        assert_eq!(YamlParser::get_optional_i32(&yaml, "missing").unwrap(), None);

        for field in ["d", "e", "f"] {
            assert!(matches!(
                YamlParser::get_optional_i32(&yaml, field),
                Err(ParseError::InvalidValue { .. })
            ));
        }
    }

    #[test]
    fn test_get_string_any() {
        let yaml = YamlParser::parse("streak_type: losing").unwrap();
        let value = YamlParser::get_string_any(&yaml, &["streakType", "streak_type"]).unwrap();
        assert_eq!(value, "losing");

        let err = YamlParser::get_string_any(&yaml, &["logic"]).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: logic");
    }

    #[test]
    fn test_multi_document() {
        let docs = YamlParser::parse_multi_document("a: 1\n---\nb: 2\n").unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_non_empty_string() {
        let yaml = YamlParser::parse("id: \"  \"").unwrap();
        assert!(YamlParser::get_non_empty_string(&yaml, "id").is_err());
    }
}
