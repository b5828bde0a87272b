//! Worker configuration

use podium_parser::ParseMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Backfill worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// PostgreSQL holding stats and awards (and the catalog unless `catalog_path` is set)
    pub database_url: Option<String>,

    /// Read the catalog from YAML files under this directory instead of the database
    pub catalog_path: Option<PathBuf>,

    /// Users evaluated at the same time
    pub concurrency: usize,

    /// Only consider achievements of this sport (plus wildcard ones)
    pub sport: Option<String>,

    /// Log level used when RUST_LOG is not set
    pub log_level: String,

    pub log_format: LogFormat,

    /// Fail on malformed catalog entries instead of evaluating them as false
    pub strict_catalog: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            catalog_path: None,
            concurrency: 8,
            sport: None,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            strict_catalog: true,
        }
    }
}

impl WorkerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/worker").required(false))
            .add_source(config::Environment::with_prefix("PODIUM"))
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(e) => {
                eprintln!("Failed to read configuration ({}), using defaults", e);
                Ok(Self::default())
            }
        }
    }

    /// Parse mode for file system catalogs
    pub fn parse_mode(&self) -> ParseMode {
        if self.strict_catalog {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    /// Filter directive used when RUST_LOG is not set
    pub fn default_filter(&self) -> String {
        format!(
            "podium_worker={level},podium_sdk={level},podium_runtime=warn",
            level = self.log_level
        )
    }
}
