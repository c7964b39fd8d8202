//! # Test Harness
//!
//! Evidence networks over fixture chains, and polling for effects of the
//! spawned block-commit hook.

use std::time::Duration;

use ev_01_attack_classifier::fixtures::ChainFixture;
use node_runtime::{EvidenceNetwork, NodeConfig};
use shared_types::{Address, ChainId};

/// Baby chain every scenario runs on.
pub fn baby_chain() -> ChainId {
    ChainId::new("root/baby")
}

/// Address of fixture validator `id`.
pub fn address(id: u8) -> Address {
    [id; 20]
}

/// Baby chain with validators `ids` committed up to `tip`, and a network
/// over it.
pub fn network(ids: &[u8], tip: u64) -> (ChainFixture, EvidenceNetwork) {
    let fixture = ChainFixture::new(baby_chain(), ids, tip);
    let network = EvidenceNetwork::with_baby_history(NodeConfig::for_testing(), fixture.history())
        .unwrap_or_else(|e| panic!("testing config rejected: {e}"));
    (fixture, network)
}

/// Poll `condition` every 10ms until it holds or one second passes.
pub async fn eventually<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
