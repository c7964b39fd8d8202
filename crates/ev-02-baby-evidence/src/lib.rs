//! # EV-02 Baby-Chain Evidence Handler
//!
//! Carries a light client's accusation to baby-chain full nodes, and on each
//! full node turns it into attributed evidence bound for the parent chain.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Flow
//!
//! ```text
//! Light client ──submit──→ f+1 full nodes ──classify──→ relay ──→ parent chain
//!                 (LightClientReporter)   (BabyEvidenceService)
//! ```
//!
//! The full-node callback is idempotent per evidence id: a resubmitted
//! accusation produces no second relay send.
//!
//! ## Module Structure
//!
//! ```text
//! ev-02-baby-evidence/
//! ├── domain/          # SubmissionOutcome, DeliveryReport, errors, invariants
//! ├── ports/           # LightClientReporterApi, BabyEvidenceApi, EvidenceForwarder
//! ├── adapters/        # HistoryTrustedHeaders
//! ├── application/     # LightClientReporter, BabyEvidenceService
//! └── config.rs        # BabyEvidenceConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::HistoryTrustedHeaders;
pub use application::{BabyEvidenceService, LightClientReporter};
pub use config::BabyEvidenceConfig;
pub use domain::{BabyEvidenceError, DeliveryReport, SubmissionOutcome};
pub use ports::{
    BabyEvidenceApi, EvidenceForwarder, FullNodeGossip, LightClientReporterApi,
    MockEvidenceForwarder, MockFullNodeGossip, TrustedHeaderStore,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
