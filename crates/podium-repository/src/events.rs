//! Event publishers

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{broadcast, Mutex};

use crate::traits::EventPublisher;
use crate::RepositoryResult;

/// An event as handed to a publisher
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedEvent {
    pub topic: String,
    pub payload: serde_json::Value,
}

/// Publisher that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPublisher;

#[async_trait]
impl EventPublisher for NoopPublisher {
    async fn publish(&self, topic: &str, _payload: serde_json::Value) -> RepositoryResult<()> {
        tracing::trace!(topic, "event dropped");
        Ok(())
    }
}

/// Publisher that records events in memory
#[derive(Debug, Default)]
pub struct MemoryPublisher {
    events: Mutex<Vec<PublishedEvent>>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far
    pub async fn events(&self) -> Vec<PublishedEvent> {
        self.events.lock().await.clone()
    }

    /// Events published on one topic
    pub async fn events_on(&self, topic: &str) -> Vec<PublishedEvent> {
        self.events
            .lock()
            .await
            .iter()
            .filter(|e| e.topic == topic)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> RepositoryResult<()> {
        self.events.lock().await.push(PublishedEvent {
            topic: topic.to_string(),
            payload,
        });
        Ok(())
    }
}

/// Fans events out to in-process subscribers
///
/// Publishing with no live subscriber is not an error. Slow subscribers lag
/// and lose the oldest events once `capacity` is exceeded.
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    sender: broadcast::Sender<PublishedEvent>,
}

impl BroadcastPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastPublisher {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl EventPublisher for BroadcastPublisher {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> RepositoryResult<()> {
        let event = PublishedEvent {
            topic: topic.to_string(),
            payload,
        };
        match self.sender.send(event) {
            Ok(receivers) => tracing::trace!(topic, receivers, "event broadcast"),
            Err(_) => tracing::debug!(topic, "no subscribers, event dropped"),
        }
        Ok(())
    }
}
