//! # Domain Errors
//!
//! Error types for the Baby-Chain Evidence Handler.

use ev_01_attack_classifier::ClassifierError;
use shared_types::{ChainId, EvidenceValidationError, Height, NodeRef};
use thiserror::Error;

/// Baby-chain evidence handler errors.
#[derive(Debug, Error)]
pub enum BabyEvidenceError {
    /// Evidence is malformed.
    #[error("Invalid evidence: {0}")]
    InvalidEvidence(#[from] EvidenceValidationError),

    /// Classification failed.
    #[error("Classification failed: {0}")]
    Classification(#[from] ClassifierError),

    /// The light client holds no verified header to compare against.
    #[error("No trusted header at height {height}")]
    NoTrustedHeader {
        /// Conflicting height
        height: Height,
    },

    /// The reported block matches the light client's trusted header.
    #[error("No attack at height {height}: reported block matches trusted header")]
    NoAttack {
        /// Reported height
        height: Height,
    },

    /// Sample cannot guarantee a correct recipient.
    #[error("Sample of {got} nodes below fault-model minimum {required}")]
    SampleTooSmall {
        /// Nodes supplied
        got: usize,
        /// Minimum required
        required: usize,
    },

    /// Sample contains a node of another chain.
    #[error("Node {node} is not a full node of {chain}")]
    ForeignNode {
        /// Offending node
        node: NodeRef,
        /// Chain of the evidence
        chain: ChainId,
    },

    /// A single gossip send failed.
    #[error("Gossip to {node} failed: {reason}")]
    Gossip {
        /// Target node
        node: NodeRef,
        /// Transport message
        reason: String,
    },

    /// The relay refused the attributed evidence.
    #[error("Forwarding failed: {0}")]
    Forwarding(String),
}

impl BabyEvidenceError {
    /// Whether resubmitting later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Classification(inner) => inner.is_retryable(),
            Self::Forwarding(_) => true,
            _ => false,
        }
    }

    /// Whether the caller broke its contract (malformed or unfounded
    /// accusation, bad sample).
    pub fn is_precondition_violation(&self) -> bool {
        match self {
            Self::InvalidEvidence(_)
            | Self::NoTrustedHeader { .. }
            | Self::NoAttack { .. }
            | Self::SampleTooSmall { .. }
            | Self::ForeignNode { .. } => true,
            Self::Classification(inner) => matches!(
                inner,
                ClassifierError::InvalidEvidence(_)
                    | ClassifierError::WrongChain { .. }
                    | ClassifierError::NoConflict { .. }
            ),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ev_01_attack_classifier::HistoryItem;

    #[test]
    fn test_missing_history_is_retryable() {
        let err: BabyEvidenceError = ClassifierError::MissingHistory {
            height: 3,
            item: HistoryItem::Header,
        }
        .into();
        assert!(err.is_retryable());
        assert!(!err.is_precondition_violation());
    }

    #[test]
    fn test_no_conflict_is_precondition_violation() {
        let err: BabyEvidenceError = ClassifierError::NoConflict { height: 3 }.into();
        assert!(err.is_precondition_violation());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_sample_too_small_message() {
        let err = BabyEvidenceError::SampleTooSmall {
            got: 1,
            required: 2,
        };
        assert_eq!(
            err.to_string(),
            "Sample of 1 nodes below fault-model minimum 2"
        );
    }
}
