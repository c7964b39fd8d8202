//! # Error Types
//!
//! Validation failures shared by every subsystem that accepts evidence.

use crate::entities::{ChainId, Height};
use thiserror::Error;

/// Evidence or light block failed a history-independent check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvidenceValidationError {
    /// Common height must lie strictly below the conflicting height.
    #[error("Common height {common} is not below conflicting height {conflicting}")]
    CommonHeightNotBelow { common: Height, conflicting: Height },

    /// Evidence names a different chain than its conflicting header.
    #[error("Evidence chain {evidence} does not match header chain {header}")]
    ChainMismatch { evidence: ChainId, header: ChainId },

    /// Commit does not finalize the header's height.
    #[error("Commit height {commit} does not match header height {header}")]
    CommitHeightMismatch { header: Height, commit: Height },

    /// Commit finalizes a different block.
    #[error("Commit block id does not match header hash")]
    CommitBlockMismatch,

    /// Supplied validator set is not the one the header commits to.
    #[error("Validator set does not match header validators hash")]
    ValidatorSetMismatch,

    /// Commit carries no signatures for the block.
    #[error("Commit has no signatures for the block")]
    EmptyCommit,
}

/// Fault model parameters are inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FaultModelError {
    /// Byzantine tolerance requires `n >= 3f + 1`.
    #[error("Fault model requires n >= 3f + 1 (f={f}, n={n})")]
    TooFewNodes { f: usize, n: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_height_error_message() {
        let err = EvidenceValidationError::CommonHeightNotBelow {
            common: 10,
            conflicting: 9,
        };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("9"));
    }

    #[test]
    fn test_fault_model_error_message() {
        let err = FaultModelError::TooFewNodes { f: 2, n: 6 };
        assert!(err.to_string().contains("f=2, n=6"));
    }
}
