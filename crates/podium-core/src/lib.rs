//! Podium Core - Core types and definitions for the Podium achievement engine
//!
//! This crate provides the fundamental types used across the Podium workspace:
//! - Achievement definitions and sport scopes
//! - Per-sport aggregated statistics
//! - Criteria rule trees and comparison operators
//! - Award records
//! - Error types

pub mod achievement;
pub mod award;
pub mod criteria;
pub mod error;
pub mod operator;
pub mod stats;

// Re-export commonly used types
pub use achievement::{Achievement, AchievementId, Rarity, SportScope};
pub use award::{AwardOutcome, AwardRecord, UserId};
pub use criteria::{CompositeLogic, Criteria, StreakType};
pub use error::{CoreError, Result};
pub use operator::Operator;
pub use stats::{SportStat, StatField};
