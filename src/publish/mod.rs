//! Event publishing to the external UI channel.

pub mod ws;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::PublishError;
use crate::pipeline::types::StructuredEvent;

/// Topic the UI listens on. The only topic this crate publishes to.
pub const CHAT_TOPIC: &str = "chat";

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 256;

/// A serialized event tagged with its topic, ready for the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundFrame {
    /// Topic scope (always [`CHAT_TOPIC`] for this crate).
    pub topic: String,
    /// The event's wire JSON, exactly as the UI receives it.
    pub payload: String,
}

/// Seam between the turn pipeline and the transport that carries events to
/// the UI. Implementations must preserve the order of `publish` calls made
/// from a single session worker.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Serialize and send one event. At-most-once: failures are reported,
    /// never retried.
    async fn publish(&self, event: &StructuredEvent) -> Result<(), PublishError>;
}

/// Publisher that fans serialized frames out to in-process subscribers
/// (WebSocket clients, tests) over a broadcast channel.
pub struct BroadcastPublisher {
    topic: String,
    tx: broadcast::Sender<OutboundFrame>,
}

impl BroadcastPublisher {
    /// Publisher on the chat topic with the default capacity.
    pub fn new() -> Arc<Self> {
        Self::with_capacity(DEFAULT_BROADCAST_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Arc<Self> {
        let (tx, _rx) = broadcast::channel(capacity);
        Arc::new(Self {
            topic: CHAT_TOPIC.to_string(),
            tx,
        })
    }

    /// Subscribe to published frames. Each WS client calls this.
    pub fn subscribe(&self) -> broadcast::Receiver<OutboundFrame> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl EventPublisher for BroadcastPublisher {
    async fn publish(&self, event: &StructuredEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_string(event)?;
        debug!(topic = %self.topic, action = event.label(), "Publishing event");

        // Ok if no subscribers are listening yet.
        let _ = self.tx.send(OutboundFrame {
            topic: self.topic.clone(),
            payload,
        });
        Ok(())
    }
}
