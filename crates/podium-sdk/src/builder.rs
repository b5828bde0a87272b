//! Builder pattern for AchievementEngine

use crate::achievement_engine::AchievementEngine;
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use podium_parser::ParseMode;
use podium_repository::{
    AchievementCatalog, AwardStore, CatalogConfig, CatalogSource, EventPublisher,
    FileSystemCatalog, MemoryCatalog, NoopPublisher, StatsProvider,
};
use std::sync::Arc;

/// Builder for AchievementEngine
///
/// # Example
///
/// ```rust,ignore
/// use podium_sdk::{AchievementEngineBuilder, CatalogConfig};
///
/// // Catalog from YAML files, in-memory stats and awards
/// let engine = AchievementEngineBuilder::new()
///     .with_catalog_config(CatalogConfig::file_system("catalog"))
///     .with_stats_provider(stats)
///     .with_award_store(awards)
///     .build()
///     .await?;
///
/// // Inline catalog (tests, demos)
/// let engine = AchievementEngineBuilder::new()
///     .with_catalog_yaml(yaml)?
///     .with_stats_provider(stats)
///     .with_award_store(awards)
///     .with_publisher(publisher)
///     .build()
///     .await?;
/// ```
pub struct AchievementEngineBuilder {
    config: EngineConfig,
    catalog: Option<Arc<dyn AchievementCatalog>>,
    stats: Option<Arc<dyn StatsProvider>>,
    awards: Option<Arc<dyn AwardStore>>,
    publisher: Option<Arc<dyn EventPublisher>>,
}

impl AchievementEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            catalog: None,
            stats: None,
            awards: None,
            publisher: None,
        }
    }

    /// Replace the whole engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set where the catalog is loaded from
    ///
    /// Ignored when a catalog is injected with [`with_catalog`](Self::with_catalog).
    pub fn with_catalog_config(mut self, catalog: CatalogConfig) -> Self {
        self.config.catalog = catalog;
        self
    }

    /// Inject a catalog
    pub fn with_catalog(mut self, catalog: Arc<dyn AchievementCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Use an in-memory catalog parsed from YAML (strict)
    pub fn with_catalog_yaml(self, yaml: &str) -> Result<Self> {
        let catalog = MemoryCatalog::from_yaml(yaml, ParseMode::Strict)?;
        Ok(self.with_catalog(Arc::new(catalog)))
    }

    pub fn with_stats_provider(mut self, stats: Arc<dyn StatsProvider>) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_award_store(mut self, awards: Arc<dyn AwardStore>) -> Self {
        self.awards = Some(awards);
        self
    }

    /// Set the notification sink. Defaults to dropping events.
    pub fn with_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Set the notification topic
    pub fn with_publish_topic(mut self, topic: impl Into<String>) -> Self {
        self.config.publish_topic = topic.into();
        self
    }

    /// Enable or disable award notifications
    pub fn publish_events(mut self, enable: bool) -> Self {
        self.config.publish_events = enable;
        self
    }

    /// Build the achievement engine
    ///
    /// A configured file system catalog is loaded once here, so a strict
    /// catalog with a malformed rule fails the build.
    pub async fn build(self) -> Result<AchievementEngine> {
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Self::catalog_from_config(&self.config.catalog).await?,
        };

        let stats = self
            .stats
            .ok_or_else(|| SdkError::ConfigError("stats provider not configured".to_string()))?;
        let awards = self
            .awards
            .ok_or_else(|| SdkError::ConfigError("award store not configured".to_string()))?;
        let publisher = self
            .publisher
            .unwrap_or_else(|| Arc::new(NoopPublisher));

        Ok(AchievementEngine::new(
            self.config,
            catalog,
            stats,
            awards,
            publisher,
        ))
    }

    async fn catalog_from_config(config: &CatalogConfig) -> Result<Arc<dyn AchievementCatalog>> {
        config
            .validate()
            .map_err(|e| SdkError::ConfigError(e.to_string()))?;

        match config.source {
            CatalogSource::FileSystem => {
                let path = config.base_path.as_deref().unwrap_or_default();
                let catalog = FileSystemCatalog::new(path)?.with_mode(config.parse_mode());
                let loaded = catalog.load_all().await?;
                tracing::info!(
                    path,
                    strict = config.strict,
                    achievements = loaded.len(),
                    "using file system catalog"
                );
                Ok(Arc::new(catalog))
            }
            CatalogSource::Database => Self::database_catalog(config).await,
            CatalogSource::Memory => {
                tracing::warn!("memory catalog configured without content, nothing can be awarded");
                Ok(Arc::new(MemoryCatalog::default()))
            }
        }
    }

    #[cfg(feature = "postgres")]
    async fn database_catalog(config: &CatalogConfig) -> Result<Arc<dyn AchievementCatalog>> {
        let url = config.database_url.as_deref().unwrap_or_default();
        let store = podium_repository::PostgresStore::new(url)
            .await?
            .with_mode(config.parse_mode());
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "postgres"))]
    async fn database_catalog(_config: &CatalogConfig) -> Result<Arc<dyn AchievementCatalog>> {
        Err(SdkError::ConfigError(
            "database catalog requires the `postgres` feature".to_string(),
        ))
    }
}

impl Default for AchievementEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
