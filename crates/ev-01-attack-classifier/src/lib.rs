//! # EV-01 Attack Classifier
//!
//! Turns a light client's accusation (a conflicting block it was served)
//! into attributable per-validator evidence.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Decision
//!
//! | Condition | Attack | Culprits |
//! |-----------|--------|----------|
//! | Header violates the validity rule | Lunatic | Signers bonded at the common height |
//! | Same round as the canonical commit | Equivocation | Signers of both commits |
//! | Different round | Amnesia | Injected `AmnesiaIsolator` |
//!
//! The reference is the canonical header at the conflicting height and the
//! canonical commit carried one block above it. Missing history is an error,
//! never an empty result.
//!
//! ## Module Structure
//!
//! ```text
//! ev-01-attack-classifier/
//! ├── domain/          # Classification, CanonicalView, errors, invariants
//! ├── algorithms/      # Attack kind decision, culprit extraction
//! ├── ports/           # AttackClassifierApi, ChainHistory, AmnesiaIsolator
//! ├── adapters/        # DeterministicFieldsCheck, InMemoryChainHistory
//! └── service.rs       # AttackClassifier
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

// Re-exports
pub use adapters::{DeterministicFieldsCheck, InMemoryChainHistory, UnavailableAmnesiaIsolator};
pub use algorithms::{determine_attack_kind, equivocation_culprits, lunatic_culprits};
pub use domain::{CanonicalView, Classification, ClassifierError, HistoryItem};
pub use ports::{
    AmnesiaIsolator, AttackClassifierApi, ChainHistory, FixedValidity, HeaderValidityCheck,
    MockAmnesiaIsolator,
};
pub use service::AttackClassifier;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
