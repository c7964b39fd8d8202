//! # Relay Configuration

use serde::{Deserialize, Serialize};
use shared_types::{ChainId, FaultModel};

/// Evidence relay configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Chain this relay sends for.
    pub source_chain: ChainId,

    /// Chain receiving the evidence.
    pub parent_chain: ChainId,

    /// Fault model of the parent chain's full-node set.
    pub fault_model: FaultModel,

    /// Requested fan-out of the pre-commitment path. Raised to the fault
    /// model's minimum when smaller.
    pub parent_sample_size: usize,

    /// Number of committed evidence hashes remembered for deduplication.
    pub dedup_cache_size: usize,
}

impl RelayConfig {
    /// Default relay from `source_chain` to `parent_chain`.
    pub fn new(source_chain: ChainId, parent_chain: ChainId) -> Self {
        Self {
            source_chain,
            parent_chain,
            fault_model: FaultModel::default(),
            parent_sample_size: 0,
            dedup_cache_size: 10_000,
        }
    }

    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self {
            dedup_cache_size: 16,
            ..Self::new(ChainId::new("root/baby"), ChainId::new("root"))
        }
    }

    /// Number of parent nodes each pre-commitment send targets.
    pub fn effective_sample_size(&self) -> usize {
        self.parent_sample_size
            .max(self.fault_model.min_sample_size())
    }
}
