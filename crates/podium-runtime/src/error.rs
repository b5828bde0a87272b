//! Runtime error types
//!
//! Evaluation never surfaces these to callers; they describe why a single
//! node or record could not satisfy a condition and are logged.

use thiserror::Error;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// A criteria node that could not be understood when it was loaded
    #[error("Malformed criteria '{kind}': {reason}")]
    MalformedCriteria { kind: String, reason: String },

    /// A record does not carry the requested field
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// Ratio denominator is zero for a record
    #[error("Division by zero")]
    DivisionByZero,
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
