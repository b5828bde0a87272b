//! Collaborators for the Podium achievement engine
//!
//! This crate defines the traits the engine consumes and ships backends for
//! them:
//!
//! - **Catalog**: [`MemoryCatalog`], [`FileSystemCatalog`] (YAML files on disk)
//! - **Stats**: [`MemoryStatsProvider`]
//! - **Awards**: [`MemoryAwardStore`], atomic check-and-insert per (user, achievement)
//! - **Events**: [`MemoryPublisher`], [`BroadcastPublisher`], [`NoopPublisher`]
//! - **PostgreSQL** (feature `postgres`): [`PostgresStore`] serving catalog,
//!   stats and awards
//!
//! # Quick Start
//!
//! ```no_run
//! use podium_repository::{AchievementCatalog, FileSystemCatalog};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let catalog = FileSystemCatalog::new("catalog")?;
//!
//!     // Everything scoped to football or to all sports
//!     let achievements = catalog.list(Some("football")).await?;
//!     println!("{} candidates", achievements.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod file_system;
pub mod memory;
pub mod traits;
mod validation;

#[cfg(feature = "postgres")]
pub mod postgres;

// Re-exports - Configuration
pub use config::{CatalogConfig, CatalogSource, ConfigError};

// Re-exports - Error
pub use error::{RepositoryError, RepositoryResult};

// Re-exports - Backends
pub use events::{BroadcastPublisher, MemoryPublisher, NoopPublisher, PublishedEvent};
pub use file_system::FileSystemCatalog;
pub use memory::{MemoryAwardStore, MemoryCatalog, MemoryStatsProvider};
pub use traits::*;

#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;
