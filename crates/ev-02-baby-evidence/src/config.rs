//! # Baby Evidence Configuration

use serde::{Deserialize, Serialize};
use shared_types::FaultModel;

/// Baby-chain evidence handler configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BabyEvidenceConfig {
    /// Byzantine fault model of the baby chain's full-node set.
    pub fault_model: FaultModel,

    /// Number of processed evidence ids remembered for deduplication.
    pub dedup_cache_size: usize,
}

impl Default for BabyEvidenceConfig {
    fn default() -> Self {
        Self {
            fault_model: FaultModel::default(),
            dedup_cache_size: 10_000,
        }
    }
}

impl BabyEvidenceConfig {
    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self {
            fault_model: FaultModel::for_nodes(4),
            dedup_cache_size: 16,
        }
    }
}
