//! # Outbound Ports
//!
//! Transport collaborators of the relay. Delivery guarantees below the
//! application layer are theirs, not the relay's.

use crate::domain::{Packet, PortId, RelayError};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{ChainId, InternalEvidence, NodeRef};
use std::collections::HashSet;

/// Routing lookup from chain id to the port registered for it.
pub trait PortRouter: Send + Sync {
    /// Port registered for `chain`.
    fn get_port(&self, chain: &ChainId) -> Result<PortId, RelayError>;
}

/// Inter-chain messaging channel.
#[async_trait]
pub trait PacketChannel: Send + Sync {
    /// Hand a packet to the transport.
    async fn send_packet(&self, packet: Packet) -> Result<(), RelayError>;
}

/// Point-to-point delivery to parent-chain full nodes.
#[async_trait]
pub trait ParentNodeGossip: Send + Sync {
    /// Send attributed evidence to one parent node.
    async fn send_evidences(
        &self,
        node: &NodeRef,
        evidences: &[InternalEvidence],
    ) -> Result<(), RelayError>;
}

/// Known parent-chain full nodes.
pub trait ParentNodeDirectory: Send + Sync {
    /// Up to `count` distinct nodes.
    fn sample(&self, count: usize) -> Vec<NodeRef>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Packet channel recording every packet.
#[derive(Default)]
pub struct MockPacketChannel {
    /// Sent packets.
    pub packets: Mutex<Vec<Packet>>,
    /// Fail every send when set.
    pub fail: bool,
}

impl MockPacketChannel {
    /// Channel whose sends always fail.
    pub fn failing() -> Self {
        Self {
            packets: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Number of packets sent.
    pub fn sent_count(&self) -> usize {
        self.packets.lock().len()
    }
}

#[async_trait]
impl PacketChannel for MockPacketChannel {
    async fn send_packet(&self, packet: Packet) -> Result<(), RelayError> {
        if self.fail {
            return Err(RelayError::Transport("channel closed".to_string()));
        }
        self.packets.lock().push(packet);
        Ok(())
    }
}

/// Parent gossip recording every send; nodes in `unreachable` fail.
#[derive(Default)]
pub struct MockParentNodeGossip {
    /// Successful sends as `(node id, batch size)`.
    pub sent: Mutex<Vec<(String, usize)>>,
    /// Node ids whose sends fail.
    pub unreachable: HashSet<String>,
}

impl MockParentNodeGossip {
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
impl ParentNodeGossip for MockParentNodeGossip {
    async fn send_evidences(
        &self,
        node: &NodeRef,
        evidences: &[InternalEvidence],
    ) -> Result<(), RelayError> {
        if self.unreachable.contains(&node.node_id) {
            return Err(RelayError::Transport(format!("{node} unreachable")));
        }
        self.sent.lock().push((node.node_id.clone(), evidences.len()));
        Ok(())
    }
}
