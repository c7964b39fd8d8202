//! # Loopback Transports
//!
//! In-process stand-ins for the three network hops of the pipeline:
//!
//! | Adapter | Port | Delivers to |
//! |---------|------|-------------|
//! | `LoopbackFullNodeGossip` | ev-02 `FullNodeGossip` | baby full nodes |
//! | `LoopbackParentGossip` | ev-03 `ParentNodeGossip` | parent node (uncommitted path) |
//! | `LoopbackPacketChannel` | ev-03 `PacketChannel` | parent node (packet path) |

use async_trait::async_trait;
use ev_02_baby_evidence::{BabyEvidenceApi, BabyEvidenceError, FullNodeGossip};
use ev_03_evidence_relay::{Acknowledgment, Packet, PacketChannel, ParentNodeGossip, RelayError};
use ev_04_parent_evidence::ParentEvidenceApi;
use parking_lot::Mutex;
use shared_types::{InternalEvidence, LightClientAttackEvidence, NodeRef};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Light client to baby full nodes.
///
/// A node's processing failure is the node's own concern; the send counts
/// as delivered once the node received the accusation.
#[derive(Default)]
pub struct LoopbackFullNodeGossip {
    nodes: HashMap<String, Arc<dyn BabyEvidenceApi>>,
}

impl LoopbackFullNodeGossip {
    /// Empty gossip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the node reachable as `node_id`.
    pub fn with_node(mut self, node_id: impl Into<String>, node: Arc<dyn BabyEvidenceApi>) -> Self {
        self.nodes.insert(node_id.into(), node);
        self
    }
}

#[async_trait]
impl FullNodeGossip for LoopbackFullNodeGossip {
    async fn send_attack_evidence(
        &self,
        node: &NodeRef,
        evidence: &LightClientAttackEvidence,
    ) -> Result<(), BabyEvidenceError> {
        let target = self
            .nodes
            .get(&node.node_id)
            .ok_or_else(|| BabyEvidenceError::Gossip {
                node: node.clone(),
                reason: "unknown node".to_string(),
            })?;

        if let Err(e) = target
            .light_client_attack_evidence_submitted(evidence.clone())
            .await
        {
            debug!(node = %node, "Node did not forward evidence: {}", e);
        }
        Ok(())
    }
}

/// Relay to parent full nodes. Every parent node id reaches the same
/// in-process parent service.
pub struct LoopbackParentGossip {
    parent: Arc<dyn ParentEvidenceApi>,
}

impl LoopbackParentGossip {
    /// Gossip into `parent`.
    pub fn new(parent: Arc<dyn ParentEvidenceApi>) -> Self {
        Self { parent }
    }
}

#[async_trait]
impl ParentNodeGossip for LoopbackParentGossip {
    async fn send_evidences(
        &self,
        node: &NodeRef,
        evidences: &[InternalEvidence],
    ) -> Result<(), RelayError> {
        self.parent
            .evidence_of_misbehaviors_submitted(evidences.to_vec())
            .await
            .map(|_| ())
            .map_err(|e| RelayError::Transport(format!("{node}: {e}")))
    }
}

/// Inter-chain channel delivering packets straight to the parent service
/// and keeping its acknowledgments.
pub struct LoopbackPacketChannel {
    parent: Arc<dyn ParentEvidenceApi>,
    acks: Mutex<Vec<(u64, Acknowledgment)>>,
}

impl LoopbackPacketChannel {
    /// Channel into `parent`.
    pub fn new(parent: Arc<dyn ParentEvidenceApi>) -> Self {
        Self {
            parent,
            acks: Mutex::new(Vec::new()),
        }
    }

    /// Acknowledgments received so far, by packet sequence.
    pub fn acknowledgments(&self) -> Vec<(u64, Acknowledgment)> {
        self.acks.lock().clone()
    }
}

#[async_trait]
impl PacketChannel for LoopbackPacketChannel {
    async fn send_packet(&self, packet: Packet) -> Result<(), RelayError> {
        let sequence = packet.sequence;
        let ack = self.parent.on_recv_packet(packet).await;
        if ack.is_success() {
            info!(sequence, "[runtime] 📬 Packet acknowledged");
        } else {
            warn!(sequence, ack = ?ack, "Packet rejected by receiver");
        }
        self.acks.lock().push((sequence, ack));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ev_02_baby_evidence::SubmissionOutcome;
    use ev_04_parent_evidence::ParentEvidenceError;
    use shared_types::ChainId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingNode {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl BabyEvidenceApi for CountingNode {
        async fn light_client_attack_evidence_submitted(
            &self,
            evidence: LightClientAttackEvidence,
        ) -> Result<SubmissionOutcome, BabyEvidenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SubmissionOutcome::Duplicate {
                evidence_id: evidence.id(),
            })
        }
    }

    struct RejectingParent;

    #[async_trait]
    impl ParentEvidenceApi for RejectingParent {
        async fn evidence_of_misbehaviors_submitted(
            &self,
            _evidences: Vec<InternalEvidence>,
        ) -> Result<usize, ParentEvidenceError> {
            Err(ParentEvidenceError::EmptyBatch)
        }

        async fn on_recv_packet(&self, _packet: Packet) -> Acknowledgment {
            Acknowledgment::error("rejected")
        }
    }

    fn baby_node(id: &str) -> NodeRef {
        NodeRef::new(id, ChainId::new("root/baby"))
    }

    #[tokio::test]
    async fn test_full_node_gossip_routes_by_node_id() {
        let fixture = ev_01_attack_classifier::fixtures::ChainFixture::new(
            ChainId::new("root/baby"),
            &[1, 2, 3],
            8,
        );
        let evidence = fixture.equivocation(5, 3, 0, &[1, 2]);
        let node = Arc::new(CountingNode::default());
        let gossip = LoopbackFullNodeGossip::new().with_node("baby-0", node.clone());

        gossip
            .send_attack_evidence(&baby_node("baby-0"), &evidence)
            .await
            .unwrap();
        let err = gossip
            .send_attack_evidence(&baby_node("baby-9"), &evidence)
            .await
            .unwrap_err();

        assert_eq!(node.calls.load(Ordering::SeqCst), 1);
        assert!(matches!(err, BabyEvidenceError::Gossip { .. }));
    }

    #[tokio::test]
    async fn test_parent_rejection_surfaces_as_transport_error() {
        let gossip = LoopbackParentGossip::new(Arc::new(RejectingParent));
        let err = gossip
            .send_evidences(&NodeRef::new("parent-0", ChainId::new("root")), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Transport(_)));
    }

    #[tokio::test]
    async fn test_packet_channel_records_negative_ack() {
        let channel = LoopbackPacketChannel::new(Arc::new(RejectingParent));
        channel
            .send_packet(Packet {
                sequence: 3,
                source_chain: ChainId::new("root/baby"),
                destination_chain: ChainId::new("root"),
                destination_port: Default::default(),
                data: Vec::new(),
            })
            .await
            .unwrap();

        assert_eq!(
            channel.acknowledgments(),
            vec![(3, Acknowledgment::error("rejected"))]
        );
    }
}
