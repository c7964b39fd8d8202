//! # Test Fixtures
//!
//! Deterministic chains and attack evidence for tests in this crate and its
//! dependents (enable the `test-utils` feature).
//!
//! Validator `id` has address `[id; 20]`, key `[id; 32]` and voting power 10.

use crate::adapters::InMemoryChainHistory;
use crate::ports::ChainHistory;
use shared_types::{
    BlockId, ChainId, Commit, CommitSig, Header, Height, LightBlock, LightClientAttackEvidence,
    Round, SignedHeader, Signature, Validator, ValidatorSet,
};
use std::sync::Arc;

/// Validator with a deterministic identity derived from `id`.
pub fn validator(id: u8) -> Validator {
    Validator::new([id; 20], vec![id; 32], 10)
}

/// Validator set over `ids`.
pub fn validator_set(ids: &[u8]) -> ValidatorSet {
    ValidatorSet::new(ids.iter().copied().map(validator).collect())
}

/// Signature of validator `id` over `block`.
pub fn signature(id: u8, block: &BlockId) -> Signature {
    let mut sig = [id; 64];
    sig[..32].copy_from_slice(&block.hash);
    sig
}

/// Commit for `header` in `round`, signed by `signers`.
pub fn commit_for(header: &Header, round: Round, signers: &[u8]) -> Commit {
    let block_id = header.block_id();
    Commit {
        height: header.height,
        round,
        block_id,
        signatures: signers
            .iter()
            .map(|id| CommitSig::commit([*id; 20], header.time, signature(*id, &block_id)))
            .collect(),
    }
}

fn app_hash(height: Height) -> [u8; 32] {
    let mut hash = [0u8; 32];
    hash[..8].copy_from_slice(&height.to_be_bytes());
    hash
}

/// Canonical chain over heights `1..=tip`.
///
/// Every height is committed in round 0 by the set that validates it unless
/// overridden with [`ChainFixture::set_commit`]. The set is fixed unless the
/// chain is built with [`ChainFixture::rotating`].
pub struct ChainFixture {
    chain: ChainId,
    schedule: Vec<(Height, Vec<u8>)>,
    history: Arc<InMemoryChainHistory>,
}

impl ChainFixture {
    /// Build the chain with one validator set throughout.
    pub fn new(chain: ChainId, ids: &[u8], tip: Height) -> Self {
        Self::rotating(chain, &[(1, ids)], tip)
    }

    /// Build a chain whose validator set changes: each `(from, ids)` entry
    /// validates heights `from..` up to the next entry. Entries must be in
    /// ascending height order, the first starting at 1.
    pub fn rotating(chain: ChainId, schedule: &[(Height, &[u8])], tip: Height) -> Self {
        let fixture = Self {
            history: Arc::new(InMemoryChainHistory::new(chain.clone())),
            chain,
            schedule: schedule
                .iter()
                .map(|(from, ids)| (*from, ids.to_vec()))
                .collect(),
        };
        let mut last: Option<Header> = None;

        for height in 1..=tip {
            let validators = fixture.validators_at(height);
            let header = Header {
                chain_id: fixture.chain.clone(),
                height,
                time: 1_000 + height * 5,
                last_block_id: last.as_ref().map(Header::block_id).unwrap_or_default(),
                validators_hash: validators.hash(),
                next_validators_hash: fixture.validators_at(height + 1).hash(),
                consensus_hash: [7u8; 32],
                app_hash: app_hash(height),
                last_results_hash: [9u8; 32],
                proposer_address: validators
                    .validators()
                    .first()
                    .map(|v| v.address)
                    .unwrap_or_default(),
            };
            let last_commit = last
                .as_ref()
                .map(|prev| commit_for(prev, 0, fixture.ids_at(prev.height)));
            fixture.history.record_block(
                header.clone(),
                last_commit,
                fixture.validators_at(height + 1),
            );
            last = Some(header);
        }

        fixture
    }

    fn ids_at(&self, height: Height) -> &[u8] {
        self.schedule
            .iter()
            .rev()
            .find(|(from, _)| *from <= height)
            .or(self.schedule.first())
            .map(|(_, ids)| ids.as_slice())
            .unwrap_or_default()
    }

    /// Chain identifier.
    pub fn chain(&self) -> &ChainId {
        &self.chain
    }

    /// Shared handle to the recorded history.
    pub fn history(&self) -> Arc<InMemoryChainHistory> {
        Arc::clone(&self.history)
    }

    /// Validator set that validates `height`.
    pub fn validators_at(&self, height: Height) -> ValidatorSet {
        validator_set(self.ids_at(height))
    }

    /// Canonical header at `height`.
    ///
    /// # Panics
    /// If `height` was never recorded.
    pub fn canonical_header(&self, height: Height) -> Header {
        self.history
            .header_at(height)
            .unwrap_or_else(|| panic!("fixture has no header at {height}"))
    }

    /// Replace the canonical commit finalizing `height`.
    pub fn set_commit(&self, height: Height, round: Round, signers: &[u8]) {
        let header = self.canonical_header(height);
        self.history
            .set_commit(height + 1, commit_for(&header, round, signers));
    }

    /// Conflicting block that honestly could have been proposed at
    /// `height`: same deterministic fields, different time and proposer.
    pub fn honest_looking_block(
        &self,
        height: Height,
        round: Round,
        signers: &[u8],
    ) -> LightBlock {
        let mut header = self.canonical_header(height);
        header.time += 1;
        header.proposer_address = [0xFE; 20];
        let commit = commit_for(&header, round, signers);
        LightBlock {
            signed_header: SignedHeader { header, commit },
            validator_set: self.validators_at(height),
        }
    }

    /// Equivocation evidence at `height`, committed in `round` by `signers`.
    pub fn equivocation(
        &self,
        height: Height,
        common: Height,
        round: Round,
        signers: &[u8],
    ) -> LightClientAttackEvidence {
        LightClientAttackEvidence::new(
            self.honest_looking_block(height, round, signers),
            common,
            self.chain.clone(),
        )
    }

    /// Amnesia evidence: an honest-looking block committed in a round the
    /// canonical commit did not use.
    pub fn amnesia(
        &self,
        height: Height,
        common: Height,
        signers: &[u8],
    ) -> LightClientAttackEvidence {
        let canonical_round = self
            .history
            .commit_at(height + 1)
            .map(|c| c.round)
            .unwrap_or_default();
        self.equivocation(height, common, canonical_round + 1, signers)
    }

    /// Lunatic evidence: a block at `height` produced by the fabricated set
    /// `fabricated`, with invented app state, signed by `signers`.
    pub fn lunatic(
        &self,
        height: Height,
        common: Height,
        fabricated: &[u8],
        signers: &[u8],
    ) -> LightClientAttackEvidence {
        let fake_set = validator_set(fabricated);
        let mut header = self.canonical_header(height);
        header.validators_hash = fake_set.hash();
        header.next_validators_hash = fake_set.hash();
        header.app_hash = [0xEE; 32];
        let commit = commit_for(&header, 0, signers);
        LightClientAttackEvidence::new(
            LightBlock {
                signed_header: SignedHeader { header, commit },
                validator_set: fake_set,
            },
            common,
            self.chain.clone(),
        )
    }

    /// Evidence reporting the canonical block itself.
    pub fn canonical_as_evidence(
        &self,
        height: Height,
        common: Height,
    ) -> LightClientAttackEvidence {
        let header = self.canonical_header(height);
        let commit = commit_for(&header, 0, self.ids_at(height));
        LightClientAttackEvidence::new(
            LightBlock {
                signed_header: SignedHeader { header, commit },
                validator_set: self.validators_at(height),
            },
            common,
            self.chain.clone(),
        )
    }
}
