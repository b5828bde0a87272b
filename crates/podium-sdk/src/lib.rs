//! Podium Achievement Engine SDK
//!
//! High-level API for evaluating a user's stats against the achievement
//! catalog and awarding what they newly qualify for, at most once per
//! (user, achievement).

pub mod achievement_engine;
pub mod builder;
pub mod config;
pub mod error;

// Re-export main types
pub use achievement_engine::{AchievementAwarded, AchievementEngine, EvaluationReport};
pub use builder::AchievementEngineBuilder;
pub use config::{EngineConfig, DEFAULT_PUBLISH_TOPIC};
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use podium_core::{Achievement, AwardOutcome, AwardRecord, Criteria, SportStat};
pub use podium_repository::{
    AchievementCatalog, AwardStore, CatalogConfig, EventPublisher, StatsProvider,
};
