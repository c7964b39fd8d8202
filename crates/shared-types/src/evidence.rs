//! # Evidence Types
//!
//! The raw accusation a light client files (`LightClientAttackEvidence`) and
//! the per-validator, attributable proofs derived from it (`InternalEvidence`).
//!
//! A `LightClientAttackEvidence` is consumed once by the attack classifier
//! and then discarded; only the `InternalEvidence` records travel on.

use crate::entities::{
    Address, BlockId, ChainId, CommitSig, Hash, Header, Height, LightBlock, Round, Validator,
};
use crate::errors::EvidenceValidationError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// The three structurally different light-client attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// Conflicting header carries fabricated deterministic fields.
    Lunatic,
    /// Same validator set signed two blocks in the same round.
    Equivocation,
    /// Same validator set signed two blocks in different rounds.
    Amnesia,
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lunatic => "lunatic",
            Self::Equivocation => "equivocation",
            Self::Amnesia => "amnesia",
        };
        f.write_str(name)
    }
}

/// The individual proof held against one culprit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Misbehavior {
    /// Signed a header whose deterministic fields contradict the chain.
    LunaticSignature {
        /// The fabricated header.
        conflicting_header: Header,
        /// The culprit's signature on it.
        signature: CommitSig,
        /// Last height both branches agreed on.
        common_height: Height,
    },
    /// Signed two different blocks at the same height and round.
    DuplicateVote {
        /// Height of both votes.
        height: Height,
        /// Round of both votes.
        round: Round,
        /// Block of the canonical vote.
        canonical_block_id: BlockId,
        /// Canonical vote.
        canonical_signature: CommitSig,
        /// Block of the conflicting vote.
        conflicting_block_id: BlockId,
        /// Conflicting vote.
        conflicting_signature: CommitSig,
    },
    /// Unlocked incorrectly across rounds.
    Amnesia {
        /// Height of the conflicting block.
        height: Height,
        /// Proof produced by the amnesia isolation algorithm.
        proof: Vec<u8>,
    },
}

impl Misbehavior {
    /// Attack class this proof belongs to.
    pub fn kind(&self) -> AttackKind {
        match self {
            Self::LunaticSignature { .. } => AttackKind::Lunatic,
            Self::DuplicateVote { .. } => AttackKind::Equivocation,
            Self::Amnesia { .. } => AttackKind::Amnesia,
        }
    }

    /// Height the misbehavior happened at.
    pub fn height(&self) -> Height {
        match self {
            Self::LunaticSignature {
                conflicting_header, ..
            } => conflicting_header.height,
            Self::DuplicateVote { height, .. } | Self::Amnesia { height, .. } => *height,
        }
    }

    fn feed(&self, hasher: &mut Sha256) {
        match self {
            Self::LunaticSignature {
                conflicting_header,
                signature,
                common_height,
            } => {
                hasher.update([0u8]);
                hasher.update(conflicting_header.hash());
                hasher.update(signature.signature);
                hasher.update(common_height.to_be_bytes());
            }
            Self::DuplicateVote {
                height,
                round,
                canonical_block_id,
                conflicting_block_id,
                ..
            } => {
                // Order-independent: the same double sign reported from
                // either side has one identity.
                let (a, b) = if canonical_block_id.hash <= conflicting_block_id.hash {
                    (canonical_block_id.hash, conflicting_block_id.hash)
                } else {
                    (conflicting_block_id.hash, canonical_block_id.hash)
                };
                hasher.update([1u8]);
                hasher.update(height.to_be_bytes());
                hasher.update(round.to_be_bytes());
                hasher.update(a);
                hasher.update(b);
            }
            Self::Amnesia { height, proof } => {
                hasher.update([2u8]);
                hasher.update(height.to_be_bytes());
                hasher.update((proof.len() as u64).to_be_bytes());
                hasher.update(proof);
            }
        }
    }
}

/// Attributable proof that one validator, on one chain, misbehaved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalEvidence {
    /// What the validator did.
    pub evidence: Misbehavior,
    /// The validator, as recorded in the snapshot the proof points to.
    pub validator: Validator,
    /// Chain the misbehavior happened on.
    pub chain: ChainId,
}

impl InternalEvidence {
    /// Create an evidence record.
    pub fn new(evidence: Misbehavior, validator: Validator, chain: ChainId) -> Self {
        Self {
            evidence,
            validator,
            chain,
        }
    }

    /// Content identity.
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        self.chain.feed(&mut hasher);
        hasher.update(self.validator.address);
        self.evidence.feed(&mut hasher);
        hasher.finalize().into()
    }

    /// Attack class.
    pub fn kind(&self) -> AttackKind {
        self.evidence.kind()
    }

    /// Culprit address.
    pub fn culprit(&self) -> Address {
        self.validator.address
    }
}

/// Unattributed signal that a conflicting block exists for `chain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightClientAttackEvidence {
    /// The conflicting block.
    pub conflicting_block: LightBlock,
    /// Last height the trusted and conflicting branches agreed on.
    pub common_height: Height,
    /// Chain under attack.
    pub chain: ChainId,
}

impl LightClientAttackEvidence {
    /// Create an accusation.
    pub fn new(conflicting_block: LightBlock, common_height: Height, chain: ChainId) -> Self {
        Self {
            conflicting_block,
            common_height,
            chain,
        }
    }

    /// Evidence identity: hash of `(chain, conflicting header, common height)`.
    ///
    /// Resubmissions of the same accusation share this id.
    pub fn id(&self) -> EvidenceId {
        let mut hasher = Sha256::new();
        self.chain.feed(&mut hasher);
        hasher.update(self.conflicting_block.header().hash());
        hasher.update(self.common_height.to_be_bytes());
        EvidenceId(hasher.finalize().into())
    }

    /// Height of the conflicting block.
    pub fn conflicting_height(&self) -> Height {
        self.conflicting_block.height()
    }

    /// Checks that need no chain history.
    pub fn validate_basic(&self) -> Result<(), EvidenceValidationError> {
        let height = self.conflicting_height();
        if self.common_height >= height {
            return Err(EvidenceValidationError::CommonHeightNotBelow {
                common: self.common_height,
                conflicting: height,
            });
        }
        let header_chain = &self.conflicting_block.header().chain_id;
        if *header_chain != self.chain {
            return Err(EvidenceValidationError::ChainMismatch {
                evidence: self.chain.clone(),
                header: header_chain.clone(),
            });
        }
        self.conflicting_block.validate_basic()
    }
}

/// Identity of a `LightClientAttackEvidence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EvidenceId(pub Hash);

impl fmt::Display for EvidenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0[..8]))
    }
}
