//! # Outbound Ports
//!
//! Dependencies of the Baby-Chain Evidence Handler.

use crate::domain::{BabyEvidenceError, DeliveryReport};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Header, Height, InternalEvidence, LightClientAttackEvidence, NodeRef};
use std::collections::HashSet;

/// Point-to-point delivery of raw accusations to baby-chain full nodes.
#[async_trait]
pub trait FullNodeGossip: Send + Sync {
    /// Send one accusation to one node.
    async fn send_attack_evidence(
        &self,
        node: &NodeRef,
        evidence: &LightClientAttackEvidence,
    ) -> Result<(), BabyEvidenceError>;
}

/// Headers the light client has verified itself.
pub trait TrustedHeaderStore: Send + Sync {
    /// Verified header at `height`.
    fn trusted_header_at(&self, height: Height) -> Option<Header>;
}

/// Hands attributed evidence to the cross-chain relay.
#[async_trait]
pub trait EvidenceForwarder: Send + Sync {
    /// Forward culprit records toward parent-chain full nodes.
    async fn forward(
        &self,
        evidences: Vec<InternalEvidence>,
    ) -> Result<DeliveryReport, BabyEvidenceError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Gossip recording every send; nodes listed in `unreachable` fail.
#[derive(Default)]
pub struct MockFullNodeGossip {
    /// Successful sends as `(node id, evidence)`.
    pub sent: Mutex<Vec<(String, LightClientAttackEvidence)>>,
    /// Node ids whose sends fail.
    pub unreachable: HashSet<String>,
}

impl MockFullNodeGossip {
    /// Gossip where `node_ids` cannot be reached.
    pub fn with_unreachable(node_ids: &[&str]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            unreachable: node_ids.iter().map(|id| id.to_string()).collect(),
        }
    }

    /// Number of successful sends.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl FullNodeGossip for MockFullNodeGossip {
    async fn send_attack_evidence(
        &self,
        node: &NodeRef,
        evidence: &LightClientAttackEvidence,
    ) -> Result<(), BabyEvidenceError> {
        if self.unreachable.contains(&node.node_id) {
            return Err(BabyEvidenceError::Gossip {
                node: node.clone(),
                reason: "connection refused".to_string(),
            });
        }
        self.sent
            .lock()
            .push((node.node_id.clone(), evidence.clone()));
        Ok(())
    }
}

/// Forwarder recording every batch.
#[derive(Default)]
pub struct MockEvidenceForwarder {
    /// Forwarded batches.
    pub batches: Mutex<Vec<Vec<InternalEvidence>>>,
    /// Fail every call when set.
    pub fail: bool,
}

impl MockEvidenceForwarder {
    /// Forwarder that rejects every batch.
    pub fn failing() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Number of batches forwarded.
    pub fn batch_count(&self) -> usize {
        self.batches.lock().len()
    }
}

#[async_trait]
impl EvidenceForwarder for MockEvidenceForwarder {
    async fn forward(
        &self,
        evidences: Vec<InternalEvidence>,
    ) -> Result<DeliveryReport, BabyEvidenceError> {
        if self.fail {
            return Err(BabyEvidenceError::Forwarding(
                "no parent nodes available".to_string(),
            ));
        }
        self.batches.lock().push(evidences);
        Ok(DeliveryReport {
            attempted: 1,
            delivered: 1,
        })
    }
}
