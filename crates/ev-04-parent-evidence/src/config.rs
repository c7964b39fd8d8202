//! # Parent Evidence Configuration

use ev_03_evidence_relay::PortId;
use serde::{Deserialize, Serialize};
use shared_types::ChainId;

/// Parent-chain evidence handler configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParentEvidenceConfig {
    /// This (parent) chain.
    pub chain: ChainId,

    /// Child chains whose evidence is accepted.
    pub child_chains: Vec<ChainId>,

    /// Port evidence packets arrive on.
    pub port: PortId,

    /// Number of received packet evidence hashes remembered.
    pub dedup_cache_size: usize,
}

impl ParentEvidenceConfig {
    /// Parent `chain` accepting evidence from `child_chains`.
    pub fn new(chain: ChainId, child_chains: Vec<ChainId>) -> Self {
        Self {
            chain,
            child_chains,
            port: PortId::evidence(),
            dedup_cache_size: 10_000,
        }
    }

    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self {
            dedup_cache_size: 16,
            ..Self::new(ChainId::new("root"), vec![ChainId::new("root/baby")])
        }
    }

    /// Whether evidence of `chain` is accepted.
    pub fn accepts(&self, chain: &ChainId) -> bool {
        self.child_chains.contains(chain)
    }
}
