//! Podium backfill worker library
//!
//! Exposes the worker's configuration and backfill loop for integration tests.

pub mod backfill;
pub mod config;
pub mod publisher;

pub use backfill::{run_backfill, BackfillFailure, BackfillSummary};
pub use config::{LogFormat, WorkerConfig};
pub use publisher::LogPublisher;
