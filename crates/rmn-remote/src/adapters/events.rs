//! # Event Sinks
//!
//! [`EventSink`] implementations:
//! - [`InMemoryEventLog`]: keeps the full history (config versions included)
//! - [`BroadcastEventSink`]: fans events out to tokio subscribers
//! - [`TracingEventSink`]: logs each event

use crate::domain::entities::VersionedConfig;
use crate::domain::events::RmnEvent;
use crate::ports::outbound::EventSink;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Default capacity of the broadcast channel.
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1024;

// =============================================================================
// In-memory history
// =============================================================================

/// Append-only event history.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: RwLock<Vec<RmnEvent>>,
}

impl InMemoryEventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events, oldest first.
    pub fn events(&self) -> Vec<RmnEvent> {
        self.events.read().clone()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Most recent event.
    pub fn last(&self) -> Option<RmnEvent> {
        self.events.read().last().cloned()
    }

    /// Every config ever committed, oldest first.
    pub fn config_history(&self) -> Vec<VersionedConfig> {
        self.events
            .read()
            .iter()
            .filter_map(|event| match event {
                RmnEvent::ConfigSet { version, config } => Some(VersionedConfig {
                    version: *version,
                    config: config.clone(),
                }),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for InMemoryEventLog {
    fn publish(&self, event: RmnEvent) {
        self.events.write().push(event);
    }
}

// =============================================================================
// Broadcast
// =============================================================================

/// Publishes events on a tokio broadcast channel.
///
/// Slow subscribers lag rather than block the writer.
#[derive(Debug, Clone)]
pub struct BroadcastEventSink {
    sender: broadcast::Sender<RmnEvent>,
}

impl BroadcastEventSink {
    /// Create a sink with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<RmnEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CHANNEL_CAPACITY)
    }
}

impl EventSink for BroadcastEventSink {
    fn publish(&self, event: RmnEvent) {
        let name = event.name();
        if self.sender.send(event).is_err() {
            debug!("[rmn-remote] No subscribers for {} event", name);
        }
    }
}

// =============================================================================
// Tracing
// =============================================================================

/// Logs every event at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: RmnEvent) {
        match &event {
            RmnEvent::ConfigSet { version, config } => info!(
                version,
                signers = config.signers.len(),
                f = config.f,
                "[rmn-remote] ConfigSet"
            ),
            RmnEvent::Cursed { subjects } | RmnEvent::Uncursed { subjects } => info!(
                subjects = ?subjects,
                "[rmn-remote] {}",
                event.name()
            ),
            RmnEvent::OwnershipTransferRequested { from, to }
            | RmnEvent::OwnershipTransferred { from, to } => info!(
                from = %hex::encode(from),
                to = %hex::encode(to),
                "[rmn-remote] {}",
                event.name()
            ),
            RmnEvent::ArmSet { arm } => {
                info!(arm = %hex::encode(arm), "[rmn-proxy] ARMSet")
            }
        }
    }
}

/// Forwards every event to each inner sink in order.
pub struct FanOutEventSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanOutEventSink {
    /// Create a fan-out over `sinks`.
    pub fn new(sinks: Vec<Arc<dyn EventSink>>) -> Self {
        Self { sinks }
    }
}

impl EventSink for FanOutEventSink {
    fn publish(&self, event: RmnEvent) {
        for sink in &self.sinks {
            sink.publish(event.clone());
        }
    }
}
