//! # EV-04 Parent-Chain Evidence Handler
//!
//! Receives child-chain evidence on the parent chain and hands it to the
//! staking module through the entry point its commitment status allows.
//!
//! **Subsystem ID:** 4
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Entry Points
//!
//! | Inbound | Origin | Staking call |
//! |---------|--------|--------------|
//! | `evidence_of_misbehaviors_submitted` | Gossip from child full nodes | `process_evidences` |
//! | `on_recv_packet` | Inter-chain packet after child commit | `submit_evidence` |
//!
//! A malformed, misrouted or foreign-typed packet yields a negative
//! acknowledgment and never reaches the staking module. A redelivered
//! packet is acknowledged without a second submission.
//!
//! ## Module Structure
//!
//! ```text
//! ev-04-parent-evidence/
//! ├── domain/          # CommittedEvidence, SlashRecord, errors
//! ├── ports/           # ParentEvidenceApi, StakingModule
//! ├── adapters/        # InMemoryStakingModule
//! ├── application/     # ParentEvidenceService
//! └── config.rs        # ParentEvidenceConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::InMemoryStakingModule;
pub use application::ParentEvidenceService;
pub use config::ParentEvidenceConfig;
pub use domain::{CommittedEvidence, ParentEvidenceError, SlashRecord, StakingError};
pub use ports::{MockStakingModule, ParentEvidenceApi, StakingModule};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
