//! Error types for the repository layer

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur while talking to a collaborator
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog content could not be parsed
    #[error("Parser error: {0}")]
    Parser(String),

    /// Invalid path provided
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database error (when database feature is enabled)
    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Event could not be delivered
    #[error("Publish error: {0}")]
    Publish(String),

    /// Backend temporarily unable to serve the request
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// Generic error
    #[error("Repository error: {0}")]
    Other(String),
}

impl From<podium_parser::ParseError> for RepositoryError {
    fn from(err: podium_parser::ParseError) -> Self {
        RepositoryError::Parser(err.to_string())
    }
}
