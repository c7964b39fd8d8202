//! Static Node Directory Adapter

use crate::ports::ParentNodeDirectory;
use shared_types::NodeRef;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed list of parent-chain full nodes.
///
/// Successive samples start at a rotating offset so load spreads over the
/// whole list.
pub struct StaticNodeDirectory {
    nodes: Vec<NodeRef>,
    cursor: AtomicUsize,
}

impl StaticNodeDirectory {
    /// Directory over `nodes`.
    pub fn new(nodes: Vec<NodeRef>) -> Self {
        Self {
            nodes,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of known nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ParentNodeDirectory for StaticNodeDirectory {
    fn sample(&self, count: usize) -> Vec<NodeRef> {
        if self.nodes.is_empty() {
            return Vec::new();
        }
        let start = self.cursor.fetch_add(1, Ordering::Relaxed) % self.nodes.len();
        self.nodes
            .iter()
            .cycle()
            .skip(start)
            .take(count.min(self.nodes.len()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared_types::ChainId;
    use std::collections::HashSet;

    fn nodes(count: usize) -> Vec<NodeRef> {
        (0..count)
            .map(|i| NodeRef::new(format!("parent-{i}"), ChainId::new("root")))
            .collect()
    }

    #[test]
    fn test_sample_rotates() {
        let directory = StaticNodeDirectory::new(nodes(3));
        let first = directory.sample(2);
        let second = directory.sample(2);
        assert_eq!(first[0].node_id, "parent-0");
        assert_eq!(second[0].node_id, "parent-1");
    }

    #[test]
    fn test_empty_directory() {
        assert!(StaticNodeDirectory::new(Vec::new()).sample(3).is_empty());
    }

    proptest! {
        #[test]
        fn prop_sample_is_distinct_and_bounded(
            size in 1usize..12,
            count in 0usize..16,
            rounds in 0usize..5,
        ) {
            let directory = StaticNodeDirectory::new(nodes(size));
            for _ in 0..rounds {
                directory.sample(1);
            }
            let sample = directory.sample(count);
            prop_assert_eq!(sample.len(), count.min(size));
            let distinct: HashSet<_> = sample.iter().map(|n| n.node_id.clone()).collect();
            prop_assert_eq!(distinct.len(), sample.len());
        }
    }
}
