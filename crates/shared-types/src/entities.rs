//! # Core Chain Entities
//!
//! The chain-scoped primitives that evidence points into: validators,
//! validator-set snapshots, headers, commits and light blocks.
//!
//! ## Clusters
//!
//! - **Identity**: `ChainId`, `Address`, `NodeRef`
//! - **Validators**: `Validator`, `ValidatorSet`
//! - **Blocks**: `Header`, `BlockId`, `Commit`, `CommitSig`, `SignedHeader`, `LightBlock`
//!
//! Everything here is append-only from the evidence core's point of view:
//! values are produced by consensus (or by an untrusted light-client report)
//! and never mutated afterwards.

use crate::errors::EvidenceValidationError;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// PRIMITIVES
// =============================================================================

/// A 32-byte SHA-256 hash.
pub type Hash = [u8; 32];

/// A 20-byte validator address.
pub type Address = [u8; 20];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// Block height.
pub type Height = u64;

/// Consensus round within a height.
pub type Round = u32;

/// Opaque chain identifier.
///
/// Hierarchical ids use `/` as separator, e.g. `root/baby-1` is a child of
/// `root`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChainId(pub String);

impl ChainId {
    /// Create a chain id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// String form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this chain sits directly below `parent` in the hierarchy.
    pub fn is_child_of(&self, parent: &ChainId) -> bool {
        match self.0.rsplit_once('/') {
            Some((prefix, leaf)) => prefix == parent.0 && !leaf.is_empty(),
            None => false,
        }
    }

    pub(crate) fn feed(&self, hasher: &mut Sha256) {
        hasher.update((self.0.len() as u64).to_be_bytes());
        hasher.update(self.0.as_bytes());
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a full node of a given chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    /// Stable node identifier.
    pub node_id: String,
    /// Chain the node serves.
    pub chain: ChainId,
}

impl NodeRef {
    /// Create a node reference.
    pub fn new(node_id: impl Into<String>, chain: ChainId) -> Self {
        Self {
            node_id: node_id.into(),
            chain,
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.node_id, self.chain)
    }
}

// =============================================================================
// VALIDATORS
// =============================================================================

/// A bonded participant as recorded in a validator-set snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    /// Stable address.
    pub address: Address,
    /// Consensus public key.
    pub pub_key: Vec<u8>,
    /// Voting power at the snapshot height.
    pub voting_power: u64,
}

impl Validator {
    /// Create a validator.
    pub fn new(address: Address, pub_key: Vec<u8>, voting_power: u64) -> Self {
        Self {
            address,
            pub_key,
            voting_power,
        }
    }
}

/// Validator-set snapshot of a chain at some height.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidatorSet {
    /// Members, kept sorted by address.
    validators: Vec<Validator>,
}

impl ValidatorSet {
    /// Build a snapshot. Members are sorted by address; later duplicates of
    /// an address are dropped.
    pub fn new(mut validators: Vec<Validator>) -> Self {
        validators.sort_by(|a, b| a.address.cmp(&b.address));
        validators.dedup_by(|a, b| a.address == b.address);
        Self { validators }
    }

    /// Members in address order.
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Bonded addresses.
    pub fn addresses(&self) -> BTreeSet<Address> {
        self.validators.iter().map(|v| v.address).collect()
    }

    /// Look up a member by address.
    pub fn get(&self, address: &Address) -> Option<&Validator> {
        self.validators
            .binary_search_by(|v| v.address.cmp(address))
            .ok()
            .map(|idx| &self.validators[idx])
    }

    /// Whether `address` is bonded in this snapshot.
    pub fn contains(&self, address: &Address) -> bool {
        self.get(address).is_some()
    }

    /// Sum of voting power.
    pub fn total_power(&self) -> u64 {
        self.validators
            .iter()
            .fold(0u64, |acc, v| acc.saturating_add(v.voting_power))
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Commitment to the snapshot, as carried in `Header::validators_hash`.
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update((self.validators.len() as u64).to_be_bytes());
        for v in &self.validators {
            hasher.update(v.address);
            hasher.update((v.pub_key.len() as u64).to_be_bytes());
            hasher.update(&v.pub_key);
            hasher.update(v.voting_power.to_be_bytes());
        }
        hasher.finalize().into()
    }
}

// =============================================================================
// BLOCKS
// =============================================================================

/// Identifies a block by the hash of its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockId {
    /// Header hash.
    pub hash: Hash,
}

impl BlockId {
    /// Create a block id from a header hash.
    pub fn new(hash: Hash) -> Self {
        Self { hash }
    }
}

/// Block header.
///
/// The `*_hash` fields other than `last_block_id` are derived
/// deterministically from the application of the previous blocks, so two
/// honest headers at the same height always agree on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Chain this header belongs to.
    pub chain_id: ChainId,
    /// Block height.
    pub height: Height,
    /// Block time (unix seconds).
    pub time: u64,
    /// Previous block.
    pub last_block_id: BlockId,
    /// Hash of the validator set signing this block.
    pub validators_hash: Hash,
    /// Hash of the validator set for the next block.
    pub next_validators_hash: Hash,
    /// Hash of the consensus parameters.
    pub consensus_hash: Hash,
    /// Application state after the previous block.
    pub app_hash: Hash,
    /// Results of the previous block's transactions.
    pub last_results_hash: Hash,
    /// Proposer of this block.
    pub proposer_address: Address,
}

impl Header {
    /// Header hash. Two headers at the same height conflict iff their
    /// hashes differ.
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        self.chain_id.feed(&mut hasher);
        hasher.update(self.height.to_be_bytes());
        hasher.update(self.time.to_be_bytes());
        hasher.update(self.last_block_id.hash);
        hasher.update(self.validators_hash);
        hasher.update(self.next_validators_hash);
        hasher.update(self.consensus_hash);
        hasher.update(self.app_hash);
        hasher.update(self.last_results_hash);
        hasher.update(self.proposer_address);
        hasher.finalize().into()
    }

    /// Block id of this header.
    pub fn block_id(&self) -> BlockId {
        BlockId::new(self.hash())
    }

    /// Whether `other` is a different block at the same height of the same chain.
    pub fn conflicts_with(&self, other: &Header) -> bool {
        self.chain_id == other.chain_id
            && self.height == other.height
            && self.hash() != other.hash()
    }
}

/// How a validator's vote relates to the committed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockIdFlag {
    /// No vote received.
    Absent,
    /// Voted for the committed block.
    Commit,
    /// Voted nil.
    Nil,
}

/// A single validator's precommit inside a `Commit`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSig {
    /// Vote kind.
    pub block_id_flag: BlockIdFlag,
    /// Signer.
    pub validator_address: Address,
    /// Vote time (unix seconds).
    pub timestamp: u64,
    /// Signature over the vote.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

impl CommitSig {
    /// A precommit for the committed block.
    pub fn commit(validator_address: Address, timestamp: u64, signature: Signature) -> Self {
        Self {
            block_id_flag: BlockIdFlag::Commit,
            validator_address,
            timestamp,
            signature,
        }
    }

    /// An absent vote placeholder.
    pub fn absent(validator_address: Address) -> Self {
        Self {
            block_id_flag: BlockIdFlag::Absent,
            validator_address,
            timestamp: 0,
            signature: [0u8; 64],
        }
    }

    /// Whether this entry counts as a signature for the committed block.
    pub fn is_commit(&self) -> bool {
        self.block_id_flag == BlockIdFlag::Commit
    }
}

/// Signatures that finalized a header, and the round they were cast in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Height of the finalized block.
    pub height: Height,
    /// Round in which the block was committed.
    pub round: Round,
    /// Finalized block.
    pub block_id: BlockId,
    /// Per-validator precommits.
    pub signatures: Vec<CommitSig>,
}

impl Commit {
    /// Addresses that signed for `block_id`.
    pub fn signers(&self) -> BTreeSet<Address> {
        self.signatures
            .iter()
            .filter(|sig| sig.is_commit())
            .map(|sig| sig.validator_address)
            .collect()
    }

    /// The committing signature of `address`, if any.
    pub fn signature_of(&self, address: &Address) -> Option<&CommitSig> {
        self.signatures
            .iter()
            .find(|sig| sig.is_commit() && sig.validator_address == *address)
    }
}

/// A header together with the commit that finalized it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedHeader {
    /// The header.
    pub header: Header,
    /// Its commit.
    pub commit: Commit,
}

/// Header, commit and validator set as delivered by an untrusted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightBlock {
    /// Signed header.
    pub signed_header: SignedHeader,
    /// Validator set claimed to have signed the header.
    pub validator_set: ValidatorSet,
}

impl LightBlock {
    /// The header.
    pub fn header(&self) -> &Header {
        &self.signed_header.header
    }

    /// The commit.
    pub fn commit(&self) -> &Commit {
        &self.signed_header.commit
    }

    /// Height of the block.
    pub fn height(&self) -> Height {
        self.signed_header.header.height
    }

    /// Internal consistency checks that need no chain history.
    pub fn validate_basic(&self) -> Result<(), EvidenceValidationError> {
        let header = self.header();
        let commit = self.commit();

        if commit.height != header.height {
            return Err(EvidenceValidationError::CommitHeightMismatch {
                header: header.height,
                commit: commit.height,
            });
        }
        if commit.block_id != header.block_id() {
            return Err(EvidenceValidationError::CommitBlockMismatch);
        }
        if self.validator_set.hash() != header.validators_hash {
            return Err(EvidenceValidationError::ValidatorSetMismatch);
        }
        if commit.signers().is_empty() {
            return Err(EvidenceValidationError::EmptyCommit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(id: u8) -> Validator {
        Validator::new([id; 20], vec![id; 32], 10)
    }

    fn header(chain: &str, height: Height, vals: &ValidatorSet) -> Header {
        Header {
            chain_id: ChainId::new(chain),
            height,
            time: 1_000 + height,
            last_block_id: BlockId::default(),
            validators_hash: vals.hash(),
            next_validators_hash: vals.hash(),
            consensus_hash: [7u8; 32],
            app_hash: [8u8; 32],
            last_results_hash: [9u8; 32],
            proposer_address: [1u8; 20],
        }
    }

    #[test]
    fn test_chain_id_hierarchy() {
        let root = ChainId::new("root");
        assert!(ChainId::new("root/baby").is_child_of(&root));
        assert!(!ChainId::new("root/baby/leaf").is_child_of(&root));
        assert!(!ChainId::new("other/baby").is_child_of(&root));
        assert!(!ChainId::new("root/").is_child_of(&root));
        assert!(!root.is_child_of(&root));
    }

    #[test]
    fn test_validator_set_sorted_and_deduplicated() {
        let set = ValidatorSet::new(vec![validator(3), validator(1), validator(3)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.validators()[0].address, [1u8; 20]);
        assert!(set.contains(&[3u8; 20]));
        assert!(!set.contains(&[2u8; 20]));
        assert_eq!(set.total_power(), 20);
    }

    #[test]
    fn test_validator_set_hash_is_order_independent() {
        let a = ValidatorSet::new(vec![validator(1), validator(2)]);
        let b = ValidatorSet::new(vec![validator(2), validator(1)]);
        assert_eq!(a.hash(), b.hash());

        let c = ValidatorSet::new(vec![validator(1)]);
        assert_ne!(a.hash(), c.hash());
    }

    #[test]
    fn test_header_conflict() {
        let vals = ValidatorSet::new(vec![validator(1)]);
        let h1 = header("baby", 5, &vals);
        let mut h2 = h1.clone();
        assert!(!h1.conflicts_with(&h2));

        h2.app_hash = [0xAA; 32];
        assert!(h1.conflicts_with(&h2));

        let other_height = header("baby", 6, &vals);
        assert!(!h1.conflicts_with(&other_height));
    }

    #[test]
    fn test_commit_signers_excludes_absent_and_nil() {
        let mut nil = CommitSig::commit([3u8; 20], 0, [0u8; 64]);
        nil.block_id_flag = BlockIdFlag::Nil;
        let commit = Commit {
            height: 5,
            round: 0,
            block_id: BlockId::default(),
            signatures: vec![
                CommitSig::commit([1u8; 20], 0, [1u8; 64]),
                CommitSig::absent([2u8; 20]),
                nil,
            ],
        };
        let signers = commit.signers();
        assert_eq!(signers.len(), 1);
        assert!(signers.contains(&[1u8; 20]));
        assert!(commit.signature_of(&[3u8; 20]).is_none());
    }

    #[test]
    fn test_light_block_validate_basic() {
        let vals = ValidatorSet::new(vec![validator(1)]);
        let h = header("baby", 5, &vals);
        let commit = Commit {
            height: 5,
            round: 0,
            block_id: h.block_id(),
            signatures: vec![CommitSig::commit([1u8; 20], 0, [1u8; 64])],
        };
        let mut block = LightBlock {
            signed_header: SignedHeader {
                header: h,
                commit,
            },
            validator_set: vals,
        };
        assert!(block.validate_basic().is_ok());

        block.signed_header.commit.height = 4;
        assert!(matches!(
            block.validate_basic(),
            Err(EvidenceValidationError::CommitHeightMismatch { .. })
        ));
    }

    #[test]
    fn test_light_block_rejects_foreign_validator_set() {
        let vals = ValidatorSet::new(vec![validator(1)]);
        let h = header("baby", 5, &vals);
        let commit = Commit {
            height: 5,
            round: 0,
            block_id: h.block_id(),
            signatures: vec![CommitSig::commit([1u8; 20], 0, [1u8; 64])],
        };
        let block = LightBlock {
            signed_header: SignedHeader {
                header: h,
                commit,
            },
            validator_set: ValidatorSet::new(vec![validator(2)]),
        };
        assert!(matches!(
            block.validate_basic(),
            Err(EvidenceValidationError::ValidatorSetMismatch)
        ));
    }
}
