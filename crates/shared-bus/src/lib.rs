//! # Shared Bus
//!
//! In-process event bus connecting the evidence subsystems.
//!
//! ```text
//!  baby consensus ──BlockCommitted──┐
//!  ev-01 classifier ──Anomaly───────┤            ┌──▶ ev-03 BlockCommitHook
//!  ev-02 baby handler ──Classified──┼──▶ bus ────┤
//!  ev-03 relay ──Forwarded/Relayed──┤            └──▶ operators (dead letters)
//!  ev-04 parent ──HandedToStaking───┘
//! ```
//!
//! `BlockCommitted` is the begin-of-block trigger for the post-commitment
//! relay path. Classification anomalies and critical errors land on
//! [`EventTopic::DeadLetterQueue`] and are logged at error level as they
//! are published.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{subsystem, EventFilter, EventTopic, EvidenceEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Events buffered per receiver before it starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;
