//! AchievementEngine - evaluates and awards achievements for one user per pass
//!
//! The module is organized into:
//! - `types`: pass report and notification payload
//! - `engine`: core AchievementEngine implementation
//! - `tests`: Unit tests (test-only)

mod engine;
mod types;

// Re-export public types
pub use engine::AchievementEngine;
pub use types::{AchievementAwarded, EvaluationReport};

// Tests module (only compiled in test mode)
#[cfg(test)]
mod tests;
