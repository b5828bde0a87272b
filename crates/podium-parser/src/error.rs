//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Invalid operator
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    /// Unrecognized criteria `type` tag
    #[error("Unknown criteria type: {0}")]
    UnknownCriteriaType(String),

    /// The same achievement id appears twice in one catalog
    #[error("Duplicate achievement id: {0}")]
    DuplicateId(String),

    /// Generic parse error
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
