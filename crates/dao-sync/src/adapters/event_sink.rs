//! Event Sink Adapters
//!
//! Implement `EventSink`: an in-memory log for inspection and a sink that
//! writes every event to the tracing subscriber.

use crate::events::DaoEvent;
use crate::ports::outbound::EventSink;
use parking_lot::RwLock;
use tracing::info;

/// Records every published event in order.
#[derive(Default)]
pub struct InMemoryEventLog {
    events: RwLock<Vec<DaoEvent>>,
}

impl InMemoryEventLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything published so far.
    pub fn events(&self) -> Vec<DaoEvent> {
        self.events.read().clone()
    }

    /// Number of events published.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// True if nothing was published.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Events published under `topic`.
    pub fn by_topic(&self, topic: &str) -> Vec<DaoEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.topic() == topic)
            .cloned()
            .collect()
    }

    /// Most recent event.
    pub fn last(&self) -> Option<DaoEvent> {
        self.events.read().last().cloned()
    }

    /// Drop everything recorded.
    pub fn clear(&self) {
        self.events.write().clear();
    }
}

impl EventSink for InMemoryEventLog {
    fn emit(&self, event: &DaoEvent) {
        self.events.write().push(event.clone());
    }
}

/// Logs each event as JSON at `info` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &DaoEvent) {
        let payload = serde_json::to_string(event).unwrap_or_else(|e| format!("<{e}>"));
        info!(topic = event.topic(), "[dao-sync] Event {}", payload);
    }
}
