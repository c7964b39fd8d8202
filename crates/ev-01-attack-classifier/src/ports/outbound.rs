//! # Outbound Ports
//!
//! What the classifier needs from the rest of the node: read-only chain
//! history, the chain's light-client validity rule and the amnesia
//! isolation strategy.
//!
//! All three are synchronous. Classification is a local read and must never
//! wait on the network.

use crate::domain::ClassifierError;
use shared_types::{
    ChainId, Commit, Header, Height, InternalEvidence, LightClientAttackEvidence, ValidatorSet,
};

/// Read-only accessor over a chain's canonical history.
///
/// Owned and mutated by the chain's consensus engine only.
pub trait ChainHistory: Send + Sync {
    /// Chain this history describes.
    fn chain_id(&self) -> ChainId;

    /// Canonical header at `height`.
    fn header_at(&self, height: Height) -> Option<Header>;

    /// Canonical commit carried in the block at `height`, i.e. the commit
    /// that finalized `height - 1`.
    fn commit_at(&self, height: Height) -> Option<Commit>;

    /// Next-validator-set snapshot recorded at `height`.
    fn next_validators_at(&self, height: Height) -> Option<ValidatorSet>;
}

/// The chain's standard light-client validity rule.
pub trait HeaderValidityCheck: Send + Sync {
    /// `true` if `conflicting` could not have been produced honestly at the
    /// height of `reference`.
    fn violates_validity(&self, reference: &Header, conflicting: &Header) -> bool;
}

/// Culprit isolation for amnesia attacks.
///
/// Needs per-round vote-set analysis that is not contained in the
/// conflicting block, so it is injected rather than implemented here.
pub trait AmnesiaIsolator: Send + Sync {
    /// Attribute an amnesia attack.
    fn isolate(
        &self,
        evidence: &LightClientAttackEvidence,
        history: &dyn ChainHistory,
    ) -> Result<Vec<InternalEvidence>, ClassifierError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Amnesia isolator returning a preset answer and counting invocations.
#[derive(Default)]
pub struct MockAmnesiaIsolator {
    /// Evidence to return.
    pub result: Vec<InternalEvidence>,
    /// Number of `isolate` calls.
    pub calls: std::sync::atomic::AtomicUsize,
}

impl MockAmnesiaIsolator {
    /// Isolator that blames with `result`.
    pub fn returning(result: Vec<InternalEvidence>) -> Self {
        Self {
            result,
            calls: Default::default(),
        }
    }

    /// Number of times the isolator ran.
    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl AmnesiaIsolator for MockAmnesiaIsolator {
    fn isolate(
        &self,
        _evidence: &LightClientAttackEvidence,
        _history: &dyn ChainHistory,
    ) -> Result<Vec<InternalEvidence>, ClassifierError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.result.clone())
    }
}

/// Validity check with a fixed verdict.
#[derive(Clone, Copy, Debug)]
pub struct FixedValidity(pub bool);

impl HeaderValidityCheck for FixedValidity {
    fn violates_validity(&self, _reference: &Header, _conflicting: &Header) -> bool {
        self.0
    }
}
