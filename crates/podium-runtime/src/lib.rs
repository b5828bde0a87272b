//! Podium Runtime - Criteria evaluation for the Podium achievement engine
//!
//! This crate provides [`CriteriaEvaluator`], a pure and synchronous function
//! from (criteria tree, stat records, sport scope) to a boolean.

pub mod error;
pub mod evaluator;

// Re-export main types
pub use error::{Result, RuntimeError};
pub use evaluator::CriteriaEvaluator;
