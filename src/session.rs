//! Per-session state and the ordered turn worker.
//!
//! Each conversation session owns its own dedup window and a single-consumer
//! queue: turns are processed and their events published strictly in
//! submission order, so the dedup write and the publish sequence can never
//! interleave across turns of one session.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::SessionError;
use crate::pipeline::processor::TurnProcessor;
use crate::pipeline::types::ConversationTurn;
use crate::publish::EventPublisher;

/// Session-scoped dedup state: the text of the most recently accepted
/// assistant turn. The window is deliberately one message deep — a repeat
/// after one intervening turn is processed again.
#[derive(Debug, Default)]
pub struct SessionState {
    last_assistant_text: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `text` equals the previously accepted assistant text.
    pub fn is_duplicate(&self, text: &str) -> bool {
        self.last_assistant_text.as_deref() == Some(text)
    }

    /// Record an accepted assistant turn, overwriting the slot.
    pub fn record(&mut self, text: &str) {
        self.last_assistant_text = Some(text.to_string());
    }
}

/// Handle to a running session worker.
///
/// Dropping the handle closes the queue; the worker drains what's in flight
/// and stops. There is no cancellation of an individual turn once queued.
pub struct Session {
    id: Uuid,
    tx: mpsc::Sender<ConversationTurn>,
    worker: JoinHandle<()>,
}

impl Session {
    /// Spawn a session worker that processes submitted turns in order and
    /// publishes each turn's events through `publisher`.
    pub fn spawn(
        processor: TurnProcessor,
        publisher: Arc<dyn EventPublisher>,
        queue_capacity: usize,
    ) -> Self {
        let id = Uuid::new_v4();
        let (tx, mut rx) = mpsc::channel::<ConversationTurn>(queue_capacity);

        let worker = tokio::spawn(async move {
            let mut state = SessionState::new();
            info!(session = %id, "Session worker started");

            while let Some(turn) = rx.recv().await {
                let events = processor.process(&mut state, &turn);
                for event in events {
                    // At-most-once: a failed publish is logged and skipped,
                    // never retried, and never stops the remaining events.
                    if let Err(e) = publisher.publish(&event).await {
                        warn!(
                            session = %id,
                            event = event.label(),
                            error = %e,
                            "Failed to publish event"
                        );
                    }
                }
            }

            debug!(session = %id, "Session worker stopped");
        });

        Self { id, tx, worker }
    }

    /// Session identifier (for logs and diagnostics).
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Submit a turn for ordered processing. Backpressure applies when the
    /// queue is full.
    pub async fn submit(&self, turn: ConversationTurn) -> Result<(), SessionError> {
        self.tx
            .send(turn)
            .await
            .map_err(|_| SessionError::QueueClosed)
    }

    /// Close the queue and wait for the worker to drain and exit.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(e) = self.worker.await {
            warn!(session = %self.id, error = %e, "Session worker panicked");
        }
    }
}
