//! # Inbound Ports
//!
//! API trait defining what the Attack Classifier can do.

use crate::domain::{Classification, ClassifierError};
use crate::ports::outbound::ChainHistory;
use shared_types::LightClientAttackEvidence;

/// Attack classifier API - inbound port.
pub trait AttackClassifierApi: Send + Sync {
    /// Derive the culprits of a light-client attack.
    ///
    /// Deterministic: the same evidence against the same history always
    /// yields the same classification. Fails instead of returning an empty
    /// set when history is missing or no culprit can be attributed.
    fn classify(
        &self,
        evidence: &LightClientAttackEvidence,
        history: &dyn ChainHistory,
    ) -> Result<Classification, ClassifierError>;
}
