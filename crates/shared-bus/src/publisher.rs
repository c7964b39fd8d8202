//! # Event Publisher
//!
//! Publishing side of the in-process evidence bus. Counts are kept per
//! topic so operators can see how many anomalies reached the dead letter
//! queue without subscribing to it.

use crate::events::{EventFilter, EventTopic, EvidenceEvent};
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::broadcast;
use tracing::{debug, error};

/// Anything evidence subsystems can emit events into.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event.
    ///
    /// Returns the number of live receivers the event was handed to. Topic
    /// filtering happens on the receiving side, so this counts every
    /// receiver, matching or not.
    async fn publish(&self, event: EvidenceEvent) -> usize;

    /// Total events published since the bus was created.
    fn events_published(&self) -> u64;
}

/// Broadcast-backed bus shared by the subsystems of one process.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<EvidenceEvent>,
    published: Mutex<HashMap<EventTopic, u64>>,
    capacity: usize,
}

impl InMemoryEventBus {
    /// Bus with [`DEFAULT_CHANNEL_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus buffering up to `capacity` events per lagging receiver.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            published: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Receive events matching `filter` one at a time.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, "[bus] New subscription");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Receive events matching `filter` as a `Stream`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.sender.subscribe(), filter)
    }

    /// Live receivers, subscriptions and streams alike.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Per-receiver buffer size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events published on `topic` so far.
    #[must_use]
    pub fn published_on(&self, topic: EventTopic) -> u64 {
        self.published.lock().get(&topic).copied().unwrap_or(0)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EvidenceEvent) -> usize {
        let topic = event.topic();
        let source = event.source_subsystem();
        *self.published.lock().entry(topic).or_insert(0) += 1;

        if topic == EventTopic::DeadLetterQueue {
            error!(source, event = ?event, "[bus] ☠ Dead-lettered event");
        }

        // A send error only means nobody is listening right now.
        let receivers = self.sender.send(event).unwrap_or(0);
        debug!(topic = ?topic, source, receivers, "[bus] Event published");
        receivers
    }

    fn events_published(&self) -> u64 {
        self.published.lock().values().sum()
    }
}
