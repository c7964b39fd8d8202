//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{Hash, InternalEvidence};

/// Packet data type tag of [`CommittedEvidencePacket`].
pub const COMMITTED_EVIDENCE_TYPE: &str = "committed_evidence";

/// Wire payload for evidence already committed on the sending chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedEvidencePacket {
    /// The committed evidence.
    pub evidence: InternalEvidence,
}

/// Every packet data type the relay sends, tagged by `"type"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelayPacketData {
    /// See [`CommittedEvidencePacket`].
    CommittedEvidence(CommittedEvidencePacket),
}

/// Result of the pre-commitment fan-out to parent-chain full nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RelayReceipt {
    /// Nodes sent to.
    pub attempted: usize,
    /// Sends the transport accepted.
    pub delivered: usize,
}

/// Result of relaying one committed evidence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommittedRelay {
    /// A packet was sent.
    Sent {
        /// Evidence identity.
        evidence_hash: Hash,
        /// Packet sequence.
        sequence: u64,
    },
    /// The evidence had already been relayed; nothing was sent.
    AlreadyRelayed {
        /// Evidence identity.
        evidence_hash: Hash,
        /// Sequence of the original packet.
        sequence: u64,
    },
}

impl CommittedRelay {
    /// Sequence of the packet carrying the evidence.
    pub fn sequence(&self) -> u64 {
        match self {
            Self::Sent { sequence, .. } | Self::AlreadyRelayed { sequence, .. } => *sequence,
        }
    }
}
