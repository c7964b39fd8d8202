//! # Inbound Ports
//!
//! API trait defining what the Evidence Relay can do.

use crate::domain::{CommittedRelay, RelayError, RelayReceipt};
use async_trait::async_trait;
use shared_types::InternalEvidence;

/// Evidence relay API - inbound port.
#[async_trait]
pub trait EvidenceRelayApi: Send + Sync {
    /// Pre-commitment path: send attributed, not yet committed evidence to
    /// a sample of parent-chain full nodes.
    ///
    /// Evidence already gossiped is left out; a batch of nothing but
    /// repeats sends nothing.
    async fn relay_attributed(
        &self,
        evidences: Vec<InternalEvidence>,
    ) -> Result<RelayReceipt, RelayError>;

    /// Post-commitment path: wrap evidence committed on this chain in a
    /// packet for the parent chain's evidence port.
    ///
    /// Repeated notification of the same evidence sends nothing.
    async fn evidence_committed(
        &self,
        evidence: InternalEvidence,
    ) -> Result<CommittedRelay, RelayError>;
}
