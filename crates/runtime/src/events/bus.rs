//! Broadcast-backed mission event bus.

use chrono::{DateTime, Utc};
use extraction_core::{MissionEvent, MissionOracle};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// A mission event with the wall-clock time it was published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionRecord {
    pub at: DateTime<Utc>,
    pub event: MissionEvent,
}

impl MissionRecord {
    pub fn kind(&self) -> &'static str {
        self.event.kind()
    }

    /// One-line JSON rendering for telemetry sinks.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Telemetry fan-out.
///
/// Cloning shares the underlying channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<MissionRecord>,
}

impl EventBus {
    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event, stamped with the current time.
    pub fn publish(&self, event: MissionEvent) {
        let kind = event.kind();
        let record = MissionRecord {
            at: Utc::now(),
            event,
        };
        if self.sender.send(record).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("No subscribers for mission event {}", kind);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MissionRecord> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionOracle for EventBus {
    fn record(&self, event: MissionEvent) {
        self.publish(event);
    }
}
