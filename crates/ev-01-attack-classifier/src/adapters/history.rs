//! In-Memory Chain History Adapter
//!
//! Implements `ChainHistory` over maps written by the local consensus engine.

use crate::ports::ChainHistory;
use parking_lot::RwLock;
use shared_types::{ChainId, Commit, Header, Height, ValidatorSet};
use std::collections::BTreeMap;
use tracing::debug;

/// Canonical history kept in memory.
///
/// Single writer (consensus), many readers (classifier instances).
pub struct InMemoryChainHistory {
    chain: ChainId,
    headers: RwLock<BTreeMap<Height, Header>>,
    commits: RwLock<BTreeMap<Height, Commit>>,
    next_validators: RwLock<BTreeMap<Height, ValidatorSet>>,
}

impl InMemoryChainHistory {
    /// Create empty history for `chain`.
    pub fn new(chain: ChainId) -> Self {
        Self {
            chain,
            headers: RwLock::new(BTreeMap::new()),
            commits: RwLock::new(BTreeMap::new()),
            next_validators: RwLock::new(BTreeMap::new()),
        }
    }

    /// Record a committed block.
    ///
    /// `last_commit` is the commit carried in this block (finalizing the
    /// previous height); genesis carries none.
    pub fn record_block(
        &self,
        header: Header,
        last_commit: Option<Commit>,
        next_validators: ValidatorSet,
    ) {
        let height = header.height;
        debug!("[ev-01] Recording canonical block at height {}", height);
        if let Some(commit) = last_commit {
            self.commits.write().insert(height, commit);
        }
        self.next_validators.write().insert(height, next_validators);
        self.headers.write().insert(height, header);
    }

    /// Overwrite the commit carried at `height`.
    pub fn set_commit(&self, height: Height, commit: Commit) {
        self.commits.write().insert(height, commit);
    }

    /// Highest recorded header height.
    pub fn tip(&self) -> Option<Height> {
        self.headers.read().keys().next_back().copied()
    }

    /// Drop everything below `height`.
    pub fn prune_below(&self, height: Height) {
        self.headers.write().retain(|h, _| *h >= height);
        self.commits.write().retain(|h, _| *h >= height);
        self.next_validators.write().retain(|h, _| *h >= height);
    }
}

impl ChainHistory for InMemoryChainHistory {
    fn chain_id(&self) -> ChainId {
        self.chain.clone()
    }

    fn header_at(&self, height: Height) -> Option<Header> {
        self.headers.read().get(&height).cloned()
    }

    fn commit_at(&self, height: Height) -> Option<Commit> {
        self.commits.read().get(&height).cloned()
    }

    fn next_validators_at(&self, height: Height) -> Option<ValidatorSet> {
        self.next_validators.read().get(&height).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ChainFixture;

    #[test]
    fn test_lookup_and_tip() {
        let fixture = ChainFixture::new(ChainId::new("baby"), &[1, 2, 3], 6);
        let history = fixture.history();

        assert_eq!(history.tip(), Some(6));
        assert_eq!(history.header_at(4).unwrap().height, 4);
        // Commit carried at 5 finalizes 4.
        assert_eq!(history.commit_at(5).unwrap().height, 4);
        assert!(history.commit_at(1).is_none());
        assert_eq!(history.next_validators_at(2).unwrap().len(), 3);
        assert!(history.header_at(7).is_none());
    }

    #[test]
    fn test_prune_below() {
        let fixture = ChainFixture::new(ChainId::new("baby"), &[1], 6);
        let history = fixture.history();
        history.prune_below(4);

        assert!(history.header_at(3).is_none());
        assert!(history.next_validators_at(3).is_none());
        assert!(history.header_at(4).is_some());
        assert_eq!(history.tip(), Some(6));
    }
}
