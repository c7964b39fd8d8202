//! # Outbound Ports
//!
//! The staking module, seen from the evidence handler.

use crate::domain::{CommittedEvidence, StakingError};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::InternalEvidence;

/// Staking module entry points.
///
/// The two operations differ in what the caller guarantees about
/// commitment and must not be conflated.
#[async_trait]
pub trait StakingModule: Send + Sync {
    /// Evidence not yet committed anywhere. The module drives it to
    /// commitment on its own chain; slashing follows that commitment.
    async fn process_evidences(&self, evidences: Vec<InternalEvidence>) -> Result<(), StakingError>;

    /// Evidence already committed on this chain. Slashes immediately.
    async fn submit_evidence(&self, evidence: CommittedEvidence) -> Result<(), StakingError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Staking module recording every call.
#[derive(Default)]
pub struct MockStakingModule {
    /// Batches passed to `process_evidences`.
    pub processed: Mutex<Vec<Vec<InternalEvidence>>>,
    /// Evidence passed to `submit_evidence`.
    pub submitted: Mutex<Vec<InternalEvidence>>,
    /// Fail every call when set.
    pub fail: bool,
}

impl MockStakingModule {
    /// Module that rejects everything.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of `submit_evidence` calls.
    pub fn submit_count(&self) -> usize {
        self.submitted.lock().len()
    }

    /// Number of `process_evidences` calls.
    pub fn process_count(&self) -> usize {
        self.processed.lock().len()
    }
}

#[async_trait]
impl StakingModule for MockStakingModule {
    async fn process_evidences(
        &self,
        evidences: Vec<InternalEvidence>,
    ) -> Result<(), StakingError> {
        if self.fail {
            return Err(StakingError::Unavailable("mock".to_string()));
        }
        self.processed.lock().push(evidences);
        Ok(())
    }

    async fn submit_evidence(&self, evidence: CommittedEvidence) -> Result<(), StakingError> {
        if self.fail {
            return Err(StakingError::Unavailable("mock".to_string()));
        }
        self.submitted.lock().push(evidence.into_inner());
        Ok(())
    }
}
