//! Event publisher that writes award events to the log

use async_trait::async_trait;
use podium_repository::{EventPublisher, RepositoryResult};

/// Logs every event at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPublisher;

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> RepositoryResult<()> {
        tracing::info!(topic, %payload, "event");
        Ok(())
    }
}
