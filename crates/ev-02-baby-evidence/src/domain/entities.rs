//! # Domain Entities

use shared_types::{AttackKind, EvidenceId};

/// Outcome of a fire-and-forget fan-out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Sends attempted.
    pub attempted: usize,
    /// Sends the transport accepted.
    pub delivered: usize,
}

impl DeliveryReport {
    /// Sends that failed.
    pub fn failed(&self) -> usize {
        self.attempted - self.delivered
    }
}

/// Result of handling one light-client accusation on a full node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Classified and handed to the relay.
    Forwarded {
        /// Identity of the accusation.
        evidence_id: EvidenceId,
        /// Attack branch that matched.
        kind: AttackKind,
        /// Number of culprits attributed.
        culprits: usize,
        /// Relay fan-out result.
        delivery: DeliveryReport,
    },
    /// Already processed; nothing was sent.
    Duplicate {
        /// Identity of the accusation.
        evidence_id: EvidenceId,
    },
}

impl SubmissionOutcome {
    /// Identity of the accusation this outcome refers to.
    pub fn evidence_id(&self) -> EvidenceId {
        match self {
            Self::Forwarded { evidence_id, .. } | Self::Duplicate { evidence_id } => *evidence_id,
        }
    }

    /// Whether this call triggered a relay send.
    pub fn is_forwarded(&self) -> bool {
        matches!(self, Self::Forwarded { .. })
    }
}
