//! # EV-03 Cross-Chain Evidence Relay
//!
//! Moves attributed evidence from the baby chain to the parent chain
//! without interpreting it.
//!
//! **Subsystem ID:** 3
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Send Paths
//!
//! | Path | Trigger | Transport | Parent entry point |
//! |------|---------|-----------|--------------------|
//! | Pre-commitment | Classified evidence | Gossip to f+1 parent full nodes | `process_evidences` |
//! | Post-commitment | Baby block commit | Packet on the evidence port | `submit_evidence` |
//!
//! No ordering holds between the two paths; the parent side deduplicates.
//!
//! ## Module Structure
//!
//! ```text
//! ev-03-evidence-relay/
//! ├── domain/          # Packet, Acknowledgment, PortId, CommittedEvidencePacket, errors
//! ├── algorithms/      # Packet data codec
//! ├── ports/           # EvidenceRelayApi, PacketChannel, PortRouter, ParentNodeGossip
//! ├── adapters/        # Routing, directory, forwarder, block-commit hook
//! ├── service.rs       # EvidenceRelayService
//! └── config.rs        # RelayConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{BlockCommitHook, RelayForwarder, StaticNodeDirectory, StaticPortRouter};
pub use algorithms::{decode_packet, encode_committed_evidence, packet_type};
pub use config::RelayConfig;
pub use domain::{
    Acknowledgment, CommittedEvidencePacket, CommittedRelay, Packet, PortId, RelayError,
    RelayPacketData, RelayReceipt, COMMITTED_EVIDENCE_TYPE, EVIDENCE_PORT,
};
pub use ports::{
    EvidenceRelayApi, MockPacketChannel, MockParentNodeGossip, PacketChannel, ParentNodeDirectory,
    ParentNodeGossip, PortRouter,
};
pub use service::EvidenceRelayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
