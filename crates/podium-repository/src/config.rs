//! Catalog configuration types
//!
//! Describes where the achievement catalog is loaded from (file system,
//! database, memory).

use podium_parser::ParseMode;
use serde::{Deserialize, Serialize};

/// Catalog source type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    /// Load from YAML files on disk
    #[default]
    FileSystem,
    /// Load from the database
    Database,
    /// Supplied in memory (tests, embedded catalogs)
    Memory,
}

/// Catalog configuration
///
/// # Examples
///
/// ```rust
/// use podium_repository::CatalogConfig;
///
/// // YAML files under ./catalog
/// let config = CatalogConfig::file_system("catalog");
///
/// // Achievements table in PostgreSQL
/// let config = CatalogConfig::database("postgresql://localhost/podium");
///
/// // Supplied by the caller
/// let config = CatalogConfig::memory();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Configuration source type
    #[serde(default)]
    pub source: CatalogSource,

    /// Catalog root directory (required for FileSystem source)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    /// Database connection URL (required for Database source)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Reject malformed criteria at load time instead of evaluating them as false
    #[serde(default)]
    pub strict: bool,
}

impl CatalogConfig {
    /// Create a file system catalog configuration
    pub fn file_system(path: impl Into<String>) -> Self {
        Self {
            source: CatalogSource::FileSystem,
            base_path: Some(path.into()),
            database_url: None,
            strict: true,
        }
    }

    /// Create a database catalog configuration
    pub fn database(url: impl Into<String>) -> Self {
        Self {
            source: CatalogSource::Database,
            base_path: None,
            database_url: Some(url.into()),
            strict: false,
        }
    }

    /// Create a memory catalog configuration
    pub fn memory() -> Self {
        Self {
            source: CatalogSource::Memory,
            base_path: None,
            database_url: None,
            strict: false,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse mode implied by `strict`
    pub fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    /// Validate the configuration
    ///
    /// Returns an error if required fields are missing for the selected source.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.source {
            CatalogSource::FileSystem if self.base_path.is_none() => Err(ConfigError::MissingField {
                catalog: "FileSystem".to_string(),
                field: "base_path".to_string(),
            }),
            CatalogSource::Database if self.database_url.is_none() => {
                Err(ConfigError::MissingField {
                    catalog: "Database".to_string(),
                    field: "database_url".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{catalog} catalog requires '{field}'")]
    MissingField { catalog: String, field: String },
}
