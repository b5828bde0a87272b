//! Configuration types for AchievementEngine

use podium_repository::CatalogConfig;
use serde::{Deserialize, Serialize};

/// Topic used for award notifications unless configured otherwise
pub const DEFAULT_PUBLISH_TOPIC: &str = "achievement.awarded";

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Topic award notifications are published on
    #[serde(default = "default_publish_topic")]
    pub publish_topic: String,

    /// Publish a notification for every new award
    #[serde(default = "default_true")]
    pub publish_events: bool,

    /// Where the catalog comes from when no catalog is injected
    #[serde(default = "CatalogConfig::memory")]
    pub catalog: CatalogConfig,
}

fn default_publish_topic() -> String {
    DEFAULT_PUBLISH_TOPIC.to_string()
}

fn default_true() -> bool {
    true
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            publish_topic: default_publish_topic(),
            publish_events: true,
            catalog: CatalogConfig::memory(),
        }
    }

    /// Set the notification topic
    pub fn with_publish_topic(mut self, topic: impl Into<String>) -> Self {
        self.publish_topic = topic.into();
        self
    }

    /// Enable or disable award notifications
    pub fn publish_events(mut self, enable: bool) -> Self {
        self.publish_events = enable;
        self
    }

    /// Set catalog configuration
    pub fn with_catalog(mut self, catalog: CatalogConfig) -> Self {
        self.catalog = catalog;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
