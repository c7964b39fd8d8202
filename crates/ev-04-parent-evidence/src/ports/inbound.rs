//! # Inbound Ports
//!
//! Receive side of both relay paths on the parent chain.

use crate::domain::ParentEvidenceError;
use async_trait::async_trait;
use ev_03_evidence_relay::{Acknowledgment, Packet};
use shared_types::InternalEvidence;

/// Parent-chain evidence handler API - inbound port.
#[async_trait]
pub trait ParentEvidenceApi: Send + Sync {
    /// Attributed evidence gossiped by a child-chain full node; not yet
    /// committed anywhere. Returns the number of records handed on.
    async fn evidence_of_misbehaviors_submitted(
        &self,
        evidences: Vec<InternalEvidence>,
    ) -> Result<usize, ParentEvidenceError>;

    /// Inter-chain packet delivered by the transport. Never fails: every
    /// rejection is a negative acknowledgment.
    async fn on_recv_packet(&self, packet: Packet) -> Acknowledgment;
}
