//! SDK error types

use podium_repository::RepositoryError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Backend could not be constructed
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// The achievement catalog could not be loaded; no awards were attempted
    #[error("Achievement catalog unavailable: {0}")]
    CatalogUnavailable(#[source] RepositoryError),

    /// The user's stats could not be loaded; no awards were attempted
    #[error("Stats unavailable: {0}")]
    StatsUnavailable(#[source] RepositoryError),

    /// The user's earned achievements could not be loaded; no awards were attempted
    #[error("Earned achievements unavailable: {0}")]
    AwardsUnavailable(#[source] RepositoryError),

    /// Persisting an award failed. Awards committed earlier in the pass stand.
    #[error("Failed to persist award '{achievement_id}': {source}")]
    Persistence {
        achievement_id: String,
        #[source]
        source: RepositoryError,
    },
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
