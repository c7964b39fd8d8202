//! # Light Client Reporter
//!
//! Light-client side of the submission flow.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{
    invariant_sample_on_chain, invariant_sample_reaches_correct, BabyEvidenceError, DeliveryReport,
};
use crate::ports::{FullNodeGossip, LightClientReporterApi, TrustedHeaderStore};
use shared_types::{FaultModel, LightClientAttackEvidence, NodeRef};

/// Sends accusations from a light client to baby-chain full nodes.
pub struct LightClientReporter<G: FullNodeGossip> {
    fault_model: FaultModel,
    trusted: Arc<dyn TrustedHeaderStore>,
    gossip: Arc<G>,
}

impl<G: FullNodeGossip> LightClientReporter<G> {
    /// Create a reporter.
    pub fn new(
        fault_model: FaultModel,
        trusted: Arc<dyn TrustedHeaderStore>,
        gossip: Arc<G>,
    ) -> Self {
        Self {
            fault_model,
            trusted,
            gossip,
        }
    }

    /// Internal: the accusation must describe a real conflict with what this
    /// light client verified.
    fn check_attack_occurred(
        &self,
        evidence: &LightClientAttackEvidence,
    ) -> Result<(), BabyEvidenceError> {
        let height = evidence.conflicting_height();
        let trusted = self
            .trusted
            .trusted_header_at(height)
            .ok_or(BabyEvidenceError::NoTrustedHeader { height })?;
        if !trusted.conflicts_with(evidence.conflicting_block.header()) {
            return Err(BabyEvidenceError::NoAttack { height });
        }
        Ok(())
    }
}

#[async_trait]
impl<G: FullNodeGossip + 'static> LightClientReporterApi for LightClientReporter<G> {
    async fn submit_light_client_attack_evidence(
        &self,
        evidence: LightClientAttackEvidence,
        full_node_sample: Vec<NodeRef>,
    ) -> Result<DeliveryReport, BabyEvidenceError> {
        evidence.validate_basic()?;
        self.check_attack_occurred(&evidence)?;
        invariant_sample_reaches_correct(&full_node_sample, &self.fault_model)?;
        invariant_sample_on_chain(&full_node_sample, &evidence.chain)?;

        let mut report = DeliveryReport::default();
        for node in &full_node_sample {
            report.attempted += 1;
            match self.gossip.send_attack_evidence(node, &evidence).await {
                Ok(()) => {
                    report.delivered += 1;
                    debug!(node = %node, evidence_id = %evidence.id(), "Evidence sent");
                }
                Err(e) => {
                    warn!("Node {} failed: {}", node, e);
                }
            }
        }

        info!(
            evidence_id = %evidence.id(),
            chain = %evidence.chain,
            attempted = report.attempted,
            delivered = report.delivered,
            "[ev-02] 📤 Light client attack evidence submitted"
        );
        Ok(report)
    }
}
