//! # Node Runtime Library
//!
//! Exposes the runtime's wiring for the binary and the integration tests.
//! The main entry point is the `main.rs` binary.
//!
//! ## Architectural Patterns
//!
//! - **EDA (Event-Driven Architecture)**: block commits reach the relay over the event bus
//! - **Hexagonal Architecture**: subsystems see each other only through ports
//! - **Loopback transports**: network hops are replaced by direct port calls

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod container;

pub use adapters::{LoopbackFullNodeGossip, LoopbackPacketChannel, LoopbackParentGossip};
pub use container::{BabyNode, ConfigError, EvidenceNetwork, NodeConfig, ParentNode};
