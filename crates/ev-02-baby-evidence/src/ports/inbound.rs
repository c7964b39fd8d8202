//! # Inbound Ports
//!
//! The two halves of the baby-chain submission flow: the light client
//! sending an accusation, and a full node receiving one.

use crate::domain::{BabyEvidenceError, DeliveryReport, SubmissionOutcome};
use async_trait::async_trait;
use shared_types::{LightClientAttackEvidence, NodeRef};

/// Light-client side: deliver an accusation to a sample of full nodes.
#[async_trait]
pub trait LightClientReporterApi: Send + Sync {
    /// Send `evidence` to every node in `full_node_sample`.
    ///
    /// Fails up front if the accusation is malformed, if no attack actually
    /// occurred or if the sample cannot reach a correct node. Individual
    /// send failures are counted in the report, never returned.
    async fn submit_light_client_attack_evidence(
        &self,
        evidence: LightClientAttackEvidence,
        full_node_sample: Vec<NodeRef>,
    ) -> Result<DeliveryReport, BabyEvidenceError>;
}

/// Full-node side: react to a received accusation.
#[async_trait]
pub trait BabyEvidenceApi: Send + Sync {
    /// Classify `evidence` and forward the culprits toward the parent chain.
    ///
    /// Idempotent per evidence identity.
    async fn light_client_attack_evidence_submitted(
        &self,
        evidence: LightClientAttackEvidence,
    ) -> Result<SubmissionOutcome, BabyEvidenceError>;
}
