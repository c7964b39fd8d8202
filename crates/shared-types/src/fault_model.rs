//! # Fault Model
//!
//! Byzantine reception assumption for evidence delivery: out of `n` full
//! nodes of a chain at most `f` are faulty, so any sample of `f + 1` distinct
//! nodes contains at least one correct recipient.

use crate::errors::FaultModelError;
use serde::{Deserialize, Serialize};

/// `(f, n)` fault model inherited from the underlying consensus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultModel {
    /// Maximum number of faulty nodes.
    pub f: usize,
    /// Total number of nodes.
    pub n: usize,
}

impl FaultModel {
    /// Create and validate a fault model.
    pub fn new(f: usize, n: usize) -> Result<Self, FaultModelError> {
        let model = Self { f, n };
        model.validate()?;
        Ok(model)
    }

    /// Largest `f` tolerated by `n` nodes.
    pub fn for_nodes(n: usize) -> Self {
        Self {
            f: n.saturating_sub(1) / 3,
            n,
        }
    }

    /// Check `n >= 3f + 1`. An `f` so large that `3f + 1` does not fit
    /// in `usize` can never be satisfied.
    pub fn validate(&self) -> Result<(), FaultModelError> {
        let required = self.f.checked_mul(3).and_then(|x| x.checked_add(1));
        if required.map_or(true, |required| self.n < required) {
            return Err(FaultModelError::TooFewNodes {
                f: self.f,
                n: self.n,
            });
        }
        Ok(())
    }

    /// Smallest sample guaranteed to reach a correct node.
    pub fn min_sample_size(&self) -> usize {
        self.f.saturating_add(1)
    }

    /// Whether a sample of `size` distinct nodes reaches a correct node.
    pub fn sample_reaches_correct(&self, size: usize) -> bool {
        size >= self.min_sample_size()
    }
}

impl Default for FaultModel {
    fn default() -> Self {
        Self::for_nodes(4)
    }
}
