//! # Domain Entities
//!
//! Classification output and the canonical view it is computed against.

use shared_types::{AttackKind, Commit, Header, InternalEvidence, ValidatorSet};

/// Canonical data the classifier compares a conflicting block against.
#[derive(Clone, Debug)]
pub struct CanonicalView {
    /// Canonical header at the conflicting height.
    pub reference: Header,
    /// Canonical commit for the conflicting height, carried one block above.
    pub reference_commit: Commit,
    /// Next-validator-set snapshot at the common height.
    pub bonded_at_common: ValidatorSet,
}

/// Result of classifying one light-client accusation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    /// Branch that matched.
    pub kind: AttackKind,
    /// One record per culprit, ordered by validator address.
    pub evidence: Vec<InternalEvidence>,
}

impl Classification {
    /// Number of culprits.
    pub fn culprit_count(&self) -> usize {
        self.evidence.len()
    }

    /// Culprit addresses in order.
    pub fn culprits(&self) -> Vec<shared_types::Address> {
        self.evidence.iter().map(InternalEvidence::culprit).collect()
    }
}
