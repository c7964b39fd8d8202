//! # Parent Evidence Service
//!
//! Hands evidence from child chains to the staking module through the entry
//! point matching its commitment status.

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ParentEvidenceConfig;
use crate::domain::{CommittedEvidence, ParentEvidenceError};
use crate::ports::{ParentEvidenceApi, StakingModule};
use ev_03_evidence_relay::{decode_packet, Acknowledgment, CommittedEvidencePacket, Packet};
use shared_bus::{EventPublisher, EvidenceEvent};
use shared_types::{Hash, InternalEvidence};

/// Parent-chain evidence service.
pub struct ParentEvidenceService<S: StakingModule> {
    /// Configuration.
    config: ParentEvidenceConfig,
    /// Staking module.
    staking: Arc<S>,
    /// Event bus.
    bus: Arc<dyn EventPublisher>,
    /// Evidence hashes already submitted from packets.
    received: Mutex<LruCache<Hash, ()>>,
}

impl<S: StakingModule> ParentEvidenceService<S> {
    /// Create a new parent evidence service.
    pub fn new(
        config: ParentEvidenceConfig,
        staking: Arc<S>,
        bus: Arc<dyn EventPublisher>,
    ) -> Self {
        let cache_size = NonZeroUsize::new(config.dedup_cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            staking,
            bus,
            received: Mutex::new(LruCache::new(cache_size)),
        }
    }

    /// Internal: routing and decoding checks of an inbound packet.
    fn accept_packet(
        &self,
        packet: &Packet,
    ) -> Result<CommittedEvidencePacket, ParentEvidenceError> {
        if packet.destination_chain != self.config.chain {
            return Err(ParentEvidenceError::WrongDestinationChain {
                expected: self.config.chain.clone(),
                found: packet.destination_chain.clone(),
            });
        }
        if packet.destination_port != self.config.port {
            return Err(ParentEvidenceError::WrongPort {
                expected: self.config.port.clone(),
                found: packet.destination_port.clone(),
            });
        }
        if !self.config.accepts(&packet.source_chain) {
            return Err(ParentEvidenceError::UnregisteredChain(
                packet.source_chain.clone(),
            ));
        }

        let decoded = decode_packet(packet)?;
        if decoded.evidence.chain != packet.source_chain {
            return Err(ParentEvidenceError::SourceMismatch {
                source_chain: packet.source_chain.clone(),
                evidence_chain: decoded.evidence.chain.clone(),
            });
        }
        Ok(decoded)
    }

    /// Internal: claim `hash` for this delivery. False if an earlier or
    /// concurrent delivery already holds it.
    fn reserve(&self, hash: Hash) -> bool {
        let mut received = self.received.lock();
        if received.contains(&hash) {
            return false;
        }
        received.put(hash, ());
        true
    }

    /// Internal: submit packet evidence unless an earlier delivery already
    /// did. Returns whether the staking module was called.
    async fn submit_committed(
        &self,
        packet: CommittedEvidencePacket,
    ) -> Result<bool, ParentEvidenceError> {
        let hash = packet.evidence.hash();
        if !self.reserve(hash) {
            return Ok(false);
        }

        let chain = packet.evidence.chain.clone();
        if let Err(err) = self
            .staking
            .submit_evidence(CommittedEvidence::from_packet(packet))
            .await
        {
            self.received.lock().pop(&hash);
            return Err(err.into());
        }

        self.bus
            .publish(EvidenceEvent::EvidenceHandedToStaking {
                chain,
                count: 1,
                committed: true,
            })
            .await;
        Ok(true)
    }
}

#[async_trait]
impl<S: StakingModule + 'static> ParentEvidenceApi for ParentEvidenceService<S> {
    async fn evidence_of_misbehaviors_submitted(
        &self,
        evidences: Vec<InternalEvidence>,
    ) -> Result<usize, ParentEvidenceError> {
        let Some(first) = evidences.first() else {
            return Err(ParentEvidenceError::EmptyBatch);
        };
        if let Some(foreign) = evidences.iter().find(|e| !self.config.accepts(&e.chain)) {
            warn!(chain = %foreign.chain, "Evidence from unregistered chain rejected");
            return Err(ParentEvidenceError::UnregisteredChain(foreign.chain.clone()));
        }

        let chain = first.chain.clone();
        let count = evidences.len();
        self.staking.process_evidences(evidences).await?;

        self.bus
            .publish(EvidenceEvent::EvidenceHandedToStaking {
                chain: chain.clone(),
                count,
                committed: false,
            })
            .await;
        info!(
            chain = %chain,
            count,
            "[ev-04] 📥 Uncommitted evidence handed to staking module"
        );
        Ok(count)
    }

    async fn on_recv_packet(&self, packet: Packet) -> Acknowledgment {
        let sequence = packet.sequence;
        let decoded = match self.accept_packet(&packet) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!(
                    sequence,
                    source = %packet.source_chain,
                    "Packet rejected: {}", err
                );
                return Acknowledgment::error(err.to_string());
            }
        };

        let evidence_hash = decoded.evidence.hash();
        match self.submit_committed(decoded).await {
            Ok(true) => {
                info!(
                    sequence,
                    evidence_hash = %hex::encode(evidence_hash),
                    "[ev-04] ✓ Committed evidence submitted for slashing"
                );
                Acknowledgment::success()
            }
            Ok(false) => {
                debug!(
                    sequence,
                    evidence_hash = %hex::encode(evidence_hash),
                    "Redelivered packet acknowledged"
                );
                Acknowledgment::success()
            }
            Err(err) => {
                warn!(sequence, "Committed evidence not submitted: {}", err);
                Acknowledgment::error(err.to_string())
            }
        }
    }
}
