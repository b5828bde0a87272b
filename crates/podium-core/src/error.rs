//! Error types for Podium Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown streak type: {0}")]
    UnknownStreakType(String),

    #[error("Unknown composite logic: {0}")]
    UnknownLogic(String),

    #[error("Unknown rarity: {0}")]
    UnknownRarity(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
