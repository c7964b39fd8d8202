//! # Amnesia Isolator Adapter
//!
//! Default isolator for nodes without an amnesia isolation algorithm.

use crate::domain::ClassifierError;
use crate::ports::{AmnesiaIsolator, ChainHistory};
use shared_types::{InternalEvidence, LightClientAttackEvidence};
use tracing::warn;

/// Refuses to attribute amnesia attacks; every call fails with
/// [`ClassifierError::AmnesiaIsolationUnavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableAmnesiaIsolator;

impl AmnesiaIsolator for UnavailableAmnesiaIsolator {
    fn isolate(
        &self,
        evidence: &LightClientAttackEvidence,
        _history: &dyn ChainHistory,
    ) -> Result<Vec<InternalEvidence>, ClassifierError> {
        warn!(
            evidence_id = %evidence.id(),
            height = evidence.conflicting_height(),
            "Amnesia attack detected but no isolation algorithm is configured"
        );
        Err(ClassifierError::AmnesiaIsolationUnavailable)
    }
}
