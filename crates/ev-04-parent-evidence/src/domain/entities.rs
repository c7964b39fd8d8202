//! # Domain Entities

use ev_03_evidence_relay::CommittedEvidencePacket;
use serde::{Deserialize, Serialize};
use shared_types::{Address, AttackKind, ChainId, Hash, Height, InternalEvidence};

/// Evidence the caller guarantees is already committed on the parent chain.
///
/// Only the packet receive path constructs it, so evidence gossiped by a
/// peer can never reach the immediate-slash entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommittedEvidence(InternalEvidence);

impl CommittedEvidence {
    pub(crate) fn from_packet(packet: CommittedEvidencePacket) -> Self {
        Self(packet.evidence)
    }

    /// The committed evidence.
    pub fn evidence(&self) -> &InternalEvidence {
        &self.0
    }

    /// Unwrap.
    pub fn into_inner(self) -> InternalEvidence {
        self.0
    }
}

/// One applied slash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashRecord {
    /// Slashed validator.
    pub validator: Address,
    /// Chain the misbehavior happened on.
    pub chain: ChainId,
    /// Height of the misbehavior.
    pub height: Height,
    /// Attack the validator took part in.
    pub kind: AttackKind,
    /// Evidence that justified the slash.
    pub evidence_hash: Hash,
}

impl SlashRecord {
    /// Slash justified by `evidence`.
    pub fn from_evidence(evidence: &InternalEvidence) -> Self {
        Self {
            validator: evidence.culprit(),
            chain: evidence.chain.clone(),
            height: evidence.evidence.height(),
            kind: evidence.kind(),
            evidence_hash: evidence.hash(),
        }
    }

    /// Offence identity: one validator is slashed at most once per height
    /// of a chain.
    pub fn offence(&self) -> (Address, ChainId, Height) {
        (self.validator, self.chain.clone(), self.height)
    }
}
