//! # Adapters
//!
//! Port implementations connecting subsystems inside one process.

pub mod loopback;

pub use loopback::{LoopbackFullNodeGossip, LoopbackPacketChannel, LoopbackParentGossip};
