//! In-Memory Staking Module Adapter
//!
//! Stand-in for the parent chain's staking module: a pending queue for
//! uncommitted evidence and a slash ledger.
//!
//! Slashing is deduplicated twice: by evidence hash and by offence
//! (validator, chain, height). Evidence of the same act arriving on both
//! relay paths therefore slashes once.

use crate::domain::{CommittedEvidence, SlashRecord, StakingError};
use crate::ports::StakingModule;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Address, ChainId, Hash, Height, InternalEvidence};
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Default)]
struct Ledger {
    pending: Vec<InternalEvidence>,
    pending_hashes: HashSet<Hash>,
    slashes: Vec<SlashRecord>,
    slashed_hashes: HashSet<Hash>,
    offences: HashSet<(Address, ChainId, Height)>,
}

impl Ledger {
    /// Slash for `evidence` unless this evidence or offence was slashed.
    fn slash(&mut self, evidence: &InternalEvidence) -> Option<SlashRecord> {
        let record = SlashRecord::from_evidence(evidence);
        if self.slashed_hashes.contains(&record.evidence_hash)
            || !self.offences.insert(record.offence())
        {
            debug!(
                validator = %hex::encode(record.validator),
                height = record.height,
                "Offence already slashed"
            );
            return None;
        }
        self.slashed_hashes.insert(record.evidence_hash);
        info!(
            validator = %hex::encode(record.validator),
            chain = %record.chain,
            height = record.height,
            kind = %record.kind,
            "[ev-04] ⚔️ Validator slashed"
        );
        self.slashes.push(record.clone());
        Some(record)
    }
}

/// In-memory staking module.
#[derive(Default)]
pub struct InMemoryStakingModule {
    ledger: Mutex<Ledger>,
}

impl InMemoryStakingModule {
    /// Empty module.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit every pending evidence and slash for it, as the parent
    /// chain's consensus would on its next block.
    pub fn commit_pending(&self) -> Vec<SlashRecord> {
        let mut ledger = self.ledger.lock();
        let pending = std::mem::take(&mut ledger.pending);
        ledger.pending_hashes.clear();
        pending
            .iter()
            .filter_map(|evidence| ledger.slash(evidence))
            .collect()
    }

    /// Evidence awaiting commitment.
    pub fn pending_count(&self) -> usize {
        self.ledger.lock().pending.len()
    }

    /// Every slash applied so far.
    pub fn slashes(&self) -> Vec<SlashRecord> {
        self.ledger.lock().slashes.clone()
    }

    /// Whether `validator` has been slashed on `chain`.
    pub fn is_slashed(&self, validator: &Address, chain: &ChainId) -> bool {
        self.ledger
            .lock()
            .slashes
            .iter()
            .any(|s| s.validator == *validator && s.chain == *chain)
    }
}

#[async_trait]
impl StakingModule for InMemoryStakingModule {
    async fn process_evidences(
        &self,
        evidences: Vec<InternalEvidence>,
    ) -> Result<(), StakingError> {
        let mut ledger = self.ledger.lock();
        for evidence in evidences {
            let hash = evidence.hash();
            if ledger.slashed_hashes.contains(&hash) || !ledger.pending_hashes.insert(hash) {
                continue;
            }
            ledger.pending.push(evidence);
        }
        debug!(pending = ledger.pending.len(), "Evidence queued for commitment");
        Ok(())
    }

    async fn submit_evidence(&self, evidence: CommittedEvidence) -> Result<(), StakingError> {
        self.ledger.lock().slash(evidence.evidence());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ev_03_evidence_relay::CommittedEvidencePacket;
    use shared_types::{BlockId, CommitSig, Misbehavior, Validator};

    fn duplicate_vote(id: u8, height: Height) -> InternalEvidence {
        let sig = CommitSig::commit([id; 20], 0, [id; 64]);
        InternalEvidence::new(
            Misbehavior::DuplicateVote {
                height,
                round: 0,
                canonical_block_id: BlockId::new([1u8; 32]),
                canonical_signature: sig.clone(),
                conflicting_block_id: BlockId::new([2u8; 32]),
                conflicting_signature: sig,
            },
            Validator::new([id; 20], vec![id; 32], 10),
            ChainId::new("root/baby"),
        )
    }

    fn committed(evidence: InternalEvidence) -> CommittedEvidence {
        CommittedEvidence::from_packet(CommittedEvidencePacket { evidence })
    }

    #[tokio::test]
    async fn test_process_evidences_waits_for_commit() {
        let staking = InMemoryStakingModule::new();
        staking
            .process_evidences(vec![duplicate_vote(1, 5), duplicate_vote(2, 5)])
            .await
            .unwrap();

        assert!(staking.slashes().is_empty());
        assert_eq!(staking.pending_count(), 2);

        let slashed = staking.commit_pending();
        assert_eq!(slashed.len(), 2);
        assert_eq!(staking.pending_count(), 0);
        assert!(staking.is_slashed(&[1u8; 20], &ChainId::new("root/baby")));
    }

    #[tokio::test]
    async fn test_submit_evidence_slashes_immediately() {
        let staking = InMemoryStakingModule::new();
        staking
            .submit_evidence(committed(duplicate_vote(1, 5)))
            .await
            .unwrap();

        assert_eq!(staking.slashes().len(), 1);
    }

    #[tokio::test]
    async fn test_both_paths_slash_once() {
        let staking = InMemoryStakingModule::new();
        staking
            .process_evidences(vec![duplicate_vote(1, 5)])
            .await
            .unwrap();
        staking
            .submit_evidence(committed(duplicate_vote(1, 5)))
            .await
            .unwrap();

        assert!(staking.commit_pending().is_empty());
        assert_eq!(staking.slashes().len(), 1);
    }

    #[tokio::test]
    async fn test_same_offence_different_proof_slashes_once() {
        let staking = InMemoryStakingModule::new();
        let amnesia = InternalEvidence::new(
            Misbehavior::Amnesia {
                height: 5,
                proof: vec![9],
            },
            Validator::new([1u8; 20], vec![1u8; 32], 10),
            ChainId::new("root/baby"),
        );
        staking
            .submit_evidence(committed(duplicate_vote(1, 5)))
            .await
            .unwrap();
        staking.submit_evidence(committed(amnesia)).await.unwrap();

        assert_eq!(staking.slashes().len(), 1);
    }

    #[tokio::test]
    async fn test_redundant_process_calls_queue_once() {
        let staking = InMemoryStakingModule::new();
        for _ in 0..3 {
            staking
                .process_evidences(vec![duplicate_vote(4, 8)])
                .await
                .unwrap();
        }
        assert_eq!(staking.pending_count(), 1);
    }
}
