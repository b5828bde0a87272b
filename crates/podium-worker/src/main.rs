//! Podium backfill worker
//!
//! Runs an achievement evaluation pass for every user with stats, or for the
//! user ids given as arguments.

use anyhow::Result;
use podium_repository::{AchievementCatalog, FileSystemCatalog, PostgresStore};
use podium_sdk::AchievementEngineBuilder;
use podium_worker::{run_backfill, LogFormat, LogPublisher, WorkerConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = WorkerConfig::load()?;

    // Initialize tracing
    init_tracing(&config)?;

    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("database_url is required (set PODIUM_DATABASE_URL)"))?;

    let store = Arc::new(PostgresStore::new(database_url).await?);
    store.migrate().await?;
    info!("Connected to database");

    let catalog: Arc<dyn AchievementCatalog> = match &config.catalog_path {
        Some(path) => {
            let catalog = FileSystemCatalog::new(path)?.with_mode(config.parse_mode());
            let loaded = catalog.load_all().await?;
            info!(
                "Using {} achievements from catalog files under {}",
                loaded.len(),
                path.display()
            );
            Arc::new(catalog)
        }
        None => {
            info!("Using catalog from database");
            store.clone()
        }
    };

    let engine = AchievementEngineBuilder::new()
        .with_catalog(catalog)
        .with_stats_provider(store.clone())
        .with_award_store(store.clone())
        .with_publisher(Arc::new(LogPublisher))
        .build()
        .await?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let user_ids = if args.is_empty() {
        store.list_user_ids().await?
    } else {
        args
    };

    info!(
        "Backfilling {} users (concurrency {}, sport {:?})",
        user_ids.len(),
        config.concurrency,
        config.sport
    );

    let summary = run_backfill(
        Arc::new(engine),
        user_ids,
        config.sport.clone(),
        config.concurrency,
    )
    .await;

    info!(
        users = summary.users,
        awarded = summary.awarded,
        points = summary.points,
        failed = summary.failures.len(),
        elapsed_ms = summary.duration.as_millis() as u64,
        "Backfill complete"
    );

    if !summary.is_success() {
        anyhow::bail!("{} of {} passes failed", summary.failures.len(), summary.users);
    }

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(config: &WorkerConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.default_filter().into());

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
