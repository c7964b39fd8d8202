//! # Evidence Relay Service
//!
//! Both send paths toward the parent chain. The relay knows nothing about
//! attack semantics; it only moves `InternalEvidence`.

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::algorithms::encode_committed_evidence;
use crate::config::RelayConfig;
use crate::domain::{CommittedEvidencePacket, CommittedRelay, Packet, RelayError, RelayReceipt};
use crate::ports::{
    EvidenceRelayApi, PacketChannel, ParentNodeDirectory, ParentNodeGossip, PortRouter,
};
use shared_types::{Hash, InternalEvidence};

/// Sequence recorded for a committed evidence whose packet is still in
/// flight. Real sequences start at 1.
const IN_FLIGHT: u64 = 0;

/// Evidence relay service.
pub struct EvidenceRelayService {
    /// Configuration.
    config: RelayConfig,
    /// Port routing.
    router: Arc<dyn PortRouter>,
    /// Inter-chain messaging channel.
    channel: Arc<dyn PacketChannel>,
    /// Parent-chain node gossip.
    gossip: Arc<dyn ParentNodeGossip>,
    /// Parent-chain node directory.
    directory: Arc<dyn ParentNodeDirectory>,
    /// Last assigned packet sequence.
    sequence: AtomicU64,
    /// Committed evidence already relayed, with its packet sequence.
    relayed: Mutex<LruCache<Hash, u64>>,
    /// Attributed evidence already gossiped to at least one parent node.
    gossiped: Mutex<LruCache<Hash, ()>>,
}

impl EvidenceRelayService {
    /// Create a new relay service.
    pub fn new(
        config: RelayConfig,
        router: Arc<dyn PortRouter>,
        channel: Arc<dyn PacketChannel>,
        gossip: Arc<dyn ParentNodeGossip>,
        directory: Arc<dyn ParentNodeDirectory>,
    ) -> Self {
        let cache_size = NonZeroUsize::new(config.dedup_cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            router,
            channel,
            gossip,
            directory,
            sequence: AtomicU64::new(0),
            relayed: Mutex::new(LruCache::new(cache_size)),
            gossiped: Mutex::new(LruCache::new(cache_size)),
        }
    }

    /// Chain this relay sends for.
    pub fn source_chain(&self) -> &shared_types::ChainId {
        &self.config.source_chain
    }

    /// Last packet sequence handed out.
    pub fn last_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Internal: all evidence must belong to the chain this relay serves.
    fn check_source(&self, evidence: &InternalEvidence) -> Result<(), RelayError> {
        if evidence.chain != self.config.source_chain {
            return Err(RelayError::ForeignEvidence {
                expected: self.config.source_chain.clone(),
                found: evidence.chain.clone(),
            });
        }
        Ok(())
    }

    /// Internal: claim `hash` for sending. Returns the earlier sequence if
    /// the evidence was already relayed or is in flight.
    fn reserve(&self, hash: Hash) -> Option<u64> {
        let mut relayed = self.relayed.lock();
        if let Some(sequence) = relayed.get(&hash) {
            return Some(*sequence);
        }
        relayed.put(hash, IN_FLIGHT);
        None
    }

    /// Internal: claim every evidence of `evidences` not gossiped before.
    /// Repeats inside the batch are dropped too.
    fn reserve_fresh(&self, evidences: Vec<InternalEvidence>) -> Vec<(Hash, InternalEvidence)> {
        let mut gossiped = self.gossiped.lock();
        evidences
            .into_iter()
            .filter_map(|evidence| {
                let hash = evidence.hash();
                if gossiped.contains(&hash) {
                    return None;
                }
                gossiped.put(hash, ());
                Some((hash, evidence))
            })
            .collect()
    }
}

#[async_trait]
impl EvidenceRelayApi for EvidenceRelayService {
    async fn relay_attributed(
        &self,
        evidences: Vec<InternalEvidence>,
    ) -> Result<RelayReceipt, RelayError> {
        if evidences.is_empty() {
            return Err(RelayError::EmptyBatch);
        }
        for evidence in &evidences {
            self.check_source(evidence)?;
        }

        let required = self.config.effective_sample_size();
        let sample = self.directory.sample(required);
        if sample.len() < required {
            return Err(RelayError::InsufficientSample {
                available: sample.len(),
                required,
            });
        }

        let batch = evidences.len();
        let (hashes, evidences): (Vec<Hash>, Vec<InternalEvidence>) =
            self.reserve_fresh(evidences).into_iter().unzip();
        if evidences.is_empty() {
            debug!(count = batch, "Attributed evidence already gossiped");
            return Ok(RelayReceipt::default());
        }

        let mut receipt = RelayReceipt::default();
        for node in &sample {
            receipt.attempted += 1;
            match self.gossip.send_evidences(node, &evidences).await {
                Ok(()) => {
                    receipt.delivered += 1;
                    debug!(node = %node, count = evidences.len(), "Evidences sent");
                }
                Err(e) => {
                    warn!("Parent node {} failed: {}", node, e);
                }
            }
        }

        // Nothing reached a parent node, so a later relay may try again.
        if receipt.delivered == 0 {
            let mut gossiped = self.gossiped.lock();
            for hash in &hashes {
                gossiped.pop(hash);
            }
        }

        info!(
            chain = %self.config.source_chain,
            parent = %self.config.parent_chain,
            count = evidences.len(),
            attempted = receipt.attempted,
            delivered = receipt.delivered,
            "[ev-03] 📤 Attributed evidence relayed to parent nodes"
        );
        Ok(receipt)
    }

    async fn evidence_committed(
        &self,
        evidence: InternalEvidence,
    ) -> Result<CommittedRelay, RelayError> {
        self.check_source(&evidence)?;
        let evidence_hash = evidence.hash();

        if let Some(sequence) = self.reserve(evidence_hash) {
            debug!(
                evidence_hash = %hex::encode(evidence_hash),
                sequence,
                "Committed evidence already relayed"
            );
            return Ok(CommittedRelay::AlreadyRelayed {
                evidence_hash,
                sequence,
            });
        }

        let result = async {
            let port = self.router.get_port(&evidence.chain)?;
            let data = encode_committed_evidence(CommittedEvidencePacket { evidence })?;
            let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
            self.channel
                .send_packet(Packet {
                    sequence,
                    source_chain: self.config.source_chain.clone(),
                    destination_chain: self.config.parent_chain.clone(),
                    destination_port: port,
                    data,
                })
                .await?;
            Ok::<u64, RelayError>(sequence)
        }
        .await;

        match result {
            Ok(sequence) => {
                self.relayed.lock().put(evidence_hash, sequence);
                info!(
                    evidence_hash = %hex::encode(evidence_hash),
                    sequence,
                    parent = %self.config.parent_chain,
                    "[ev-03] 📦 Committed evidence packet sent"
                );
                Ok(CommittedRelay::Sent {
                    evidence_hash,
                    sequence,
                })
            }
            Err(err) => {
                self.relayed.lock().pop(&evidence_hash);
                warn!(
                    evidence_hash = %hex::encode(evidence_hash),
                    "Committed evidence not relayed: {}", err
                );
                Err(err)
            }
        }
    }
}
