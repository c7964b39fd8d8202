//! # Domain Errors
//!
//! Error types for the Attack Classifier.

use shared_types::{AttackKind, ChainId, EvidenceValidationError, Height};
use std::fmt;
use thiserror::Error;

/// Piece of chain history the classifier reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryItem {
    /// Canonical header.
    Header,
    /// Canonical commit carried in a block.
    Commit,
    /// Next-validator-set snapshot.
    NextValidators,
}

impl fmt::Display for HistoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Header => "header",
            Self::Commit => "commit",
            Self::NextValidators => "next validator set",
        };
        f.write_str(name)
    }
}

/// Attack classifier error types.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Evidence is malformed.
    #[error("Invalid evidence: {0}")]
    InvalidEvidence(#[from] EvidenceValidationError),

    /// Evidence targets a chain this history does not describe.
    #[error("Evidence for chain {found}, history is for {expected}")]
    WrongChain {
        /// Chain of the available history
        expected: ChainId,
        /// Chain named by the evidence
        found: ChainId,
    },

    /// Required history is not synced yet. Retry once it is.
    #[error("Missing {item} at height {height}")]
    MissingHistory {
        /// Height that was requested
        height: Height,
        /// What was requested
        item: HistoryItem,
    },

    /// Canonical history contradicts itself.
    #[error("Inconsistent history at height {height}: {reason}")]
    InconsistentHistory {
        /// Height of the inconsistency
        height: Height,
        /// Description
        reason: String,
    },

    /// The reported block is the canonical one: no attack occurred.
    #[error("No conflict at height {height}: reported block is canonical")]
    NoConflict {
        /// Reported height
        height: Height,
    },

    /// An attack branch found nobody to blame.
    #[error("Classification anomaly: {kind} attack yielded no culprits")]
    NoCulprits {
        /// Branch that came up empty
        kind: AttackKind,
    },

    /// No amnesia isolation algorithm is configured.
    #[error("Amnesia isolation unavailable")]
    AmnesiaIsolationUnavailable,

    /// The amnesia isolation algorithm failed.
    #[error("Amnesia isolation failed: {0}")]
    AmnesiaIsolation(String),
}

impl ClassifierError {
    /// Whether the caller should retry after syncing more history.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::MissingHistory { .. })
    }

    /// Whether the error signals a classifier anomaly rather than bad input.
    pub fn is_anomaly(&self) -> bool {
        matches!(
            self,
            Self::NoCulprits { .. } | Self::InconsistentHistory { .. }
        )
    }
}
