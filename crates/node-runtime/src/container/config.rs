//! # Node Configuration
//!
//! Unified configuration for the baby node, the relay and the parent node.
//!
//! ## Environment Overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `EV_BABY_CHAIN` | `baby_chain` |
//! | `EV_PARENT_CHAIN` | `parent_chain` |
//! | `EV_FAULT_F` | `fault_model.f` |
//! | `EV_FAULT_N` | `fault_model.n` |
//! | `EV_DEDUP_CACHE_SIZE` | `dedup_cache_size` |
//! | `EV_PARENT_BLOCK_MS` | `parent_block_interval` |

use ev_02_baby_evidence::BabyEvidenceConfig;
use ev_03_evidence_relay::RelayConfig;
use ev_04_parent_evidence::ParentEvidenceConfig;
use shared_types::{ChainId, FaultModel, FaultModelError};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Baby chain whose light clients report attacks.
    pub baby_chain: ChainId,
    /// Parent chain that slashes.
    pub parent_chain: ChainId,
    /// Byzantine fault model shared by both full-node sets.
    pub fault_model: FaultModel,
    /// Size of every deduplication cache.
    pub dedup_cache_size: usize,
    /// Baby-chain full nodes run in this process.
    pub baby_nodes: usize,
    /// Parent-chain full nodes known to the relay.
    pub parent_nodes: usize,
    /// Time between parent blocks. Uncommitted evidence queued with the
    /// staking module is slashed when the next parent block commits.
    pub parent_block_interval: Duration,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            baby_chain: ChainId::new("root/baby"),
            parent_chain: ChainId::new("root"),
            fault_model: FaultModel::default(),
            dedup_cache_size: 10_000,
            baby_nodes: 4,
            parent_nodes: 4,
            parent_block_interval: Duration::from_secs(5),
        }
    }
}

impl NodeConfig {
    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self {
            dedup_cache_size: 16,
            parent_block_interval: Duration::from_millis(20),
            ..Self::default()
        }
    }

    /// Apply `EV_*` overrides read through `lookup`.
    ///
    /// Unparsable values are logged and skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(chain) = lookup("EV_BABY_CHAIN") {
            self.baby_chain = ChainId::new(chain);
        }
        if let Some(chain) = lookup("EV_PARENT_CHAIN") {
            self.parent_chain = ChainId::new(chain);
        }
        if let Some(f) = parse_var(&lookup, "EV_FAULT_F") {
            self.fault_model.f = f;
        }
        if let Some(n) = parse_var(&lookup, "EV_FAULT_N") {
            self.fault_model.n = n;
        }
        if let Some(size) = parse_var(&lookup, "EV_DEDUP_CACHE_SIZE") {
            self.dedup_cache_size = size;
        }
        if let Some(millis) = parse_var(&lookup, "EV_PARENT_BLOCK_MS") {
            self.parent_block_interval = Duration::from_millis(millis);
        }
    }

    /// Default configuration with overrides from the process environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        info!(
            baby = %config.baby_chain,
            parent = %config.parent_chain,
            f = config.fault_model.f,
            n = config.fault_model.n,
            "Configuration loaded"
        );
        config
    }

    /// Check the configuration before any subsystem is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fault_model.validate()?;
        if !self.baby_chain.is_child_of(&self.parent_chain) {
            return Err(ConfigError::NotAChildChain {
                child: self.baby_chain.clone(),
                parent: self.parent_chain.clone(),
            });
        }
        let required = self.fault_model.min_sample_size();
        for (role, available) in [("baby", self.baby_nodes), ("parent", self.parent_nodes)] {
            if available < required {
                return Err(ConfigError::TooFewNodes {
                    role,
                    available,
                    required,
                });
            }
        }
        if self.dedup_cache_size == 0 {
            return Err(ConfigError::ZeroCacheSize);
        }
        if self.parent_block_interval.is_zero() {
            return Err(ConfigError::ZeroBlockInterval);
        }
        Ok(())
    }

    /// Configuration of each baby full node.
    pub fn baby_evidence(&self) -> BabyEvidenceConfig {
        BabyEvidenceConfig {
            fault_model: self.fault_model,
            dedup_cache_size: self.dedup_cache_size,
        }
    }

    /// Configuration of the relay.
    pub fn relay(&self) -> RelayConfig {
        RelayConfig {
            fault_model: self.fault_model,
            dedup_cache_size: self.dedup_cache_size,
            ..RelayConfig::new(self.baby_chain.clone(), self.parent_chain.clone())
        }
    }

    /// Configuration of the parent node.
    pub fn parent_evidence(&self) -> ParentEvidenceConfig {
        ParentEvidenceConfig {
            dedup_cache_size: self.dedup_cache_size,
            ..ParentEvidenceConfig::new(self.parent_chain.clone(), vec![self.baby_chain.clone()])
        }
    }
}

fn parse_var<T: FromStr, F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("{} has invalid value {:?}, keeping default", key, raw);
            None
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The fault model is unsatisfiable.
    #[error(transparent)]
    FaultModel(#[from] FaultModelError),

    /// The baby chain does not hang below the parent chain.
    #[error("{child} is not a child chain of {parent}")]
    NotAChildChain {
        /// Configured baby chain
        child: ChainId,
        /// Configured parent chain
        parent: ChainId,
    },

    /// A node set cannot supply a sample reaching a correct node.
    #[error("{available} {role} nodes configured, at least {required} required")]
    TooFewNodes {
        /// Which node set
        role: &'static str,
        /// Configured nodes
        available: usize,
        /// Minimum sample size
        required: usize,
    },

    /// The supplied baby chain history belongs to another chain.
    #[error("Baby history is for {found}, configured baby chain is {expected}")]
    HistoryChainMismatch {
        /// Configured baby chain
        expected: ChainId,
        /// Chain of the history
        found: ChainId,
    },

    /// Deduplication caches must hold at least one entry.
    #[error("Deduplication cache size must be positive")]
    ZeroCacheSize,

    /// Parent blocks must be spaced in time.
    #[error("Parent block interval must be positive")]
    ZeroBlockInterval,
}
