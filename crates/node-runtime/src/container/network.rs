//! # Evidence Network
//!
//! Holds every subsystem instance of one baby chain and its parent chain,
//! wired together through loopback transports.
//!
//! ## Wiring
//!
//! ```text
//! LightClientReporter ──gossip──→ baby nodes (BabyEvidenceService × baby_nodes)
//!                                     │ RelayForwarder
//!                                     ↓
//!                             EvidenceRelayService ──gossip──→ ParentEvidenceService
//!                                     ↑          └──packet──→        │
//!     BlockCommitted ──→ BlockCommitHook                             ↓
//!                                    parent blocks ──commit──→ InMemoryStakingModule
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

use ev_01_attack_classifier::{AttackClassifier, ChainHistory, InMemoryChainHistory};
use ev_02_baby_evidence::{BabyEvidenceService, HistoryTrustedHeaders, LightClientReporter};
use ev_03_evidence_relay::{
    BlockCommitHook, EvidenceRelayService, PortId, RelayForwarder, StaticNodeDirectory,
    StaticPortRouter,
};
use ev_04_parent_evidence::{InMemoryStakingModule, ParentEvidenceService};
use shared_bus::{EventPublisher, EvidenceEvent, InMemoryEventBus};
use shared_types::{Height, InternalEvidence, NodeRef};

use crate::adapters::{LoopbackFullNodeGossip, LoopbackPacketChannel, LoopbackParentGossip};
use crate::container::config::{ConfigError, NodeConfig};

/// Baby full node as wired here.
pub type BabyNode = BabyEvidenceService<AttackClassifier, RelayForwarder<EvidenceRelayService>>;

/// Parent node as wired here.
pub type ParentNode = ParentEvidenceService<InMemoryStakingModule>;

/// All subsystems of the in-process evidence pipeline.
pub struct EvidenceNetwork {
    /// Validated configuration.
    pub config: NodeConfig,
    /// Shared event bus.
    pub bus: Arc<InMemoryEventBus>,
    /// Canonical baby-chain history, shared by every baby node.
    pub baby_history: Arc<InMemoryChainHistory>,
    /// Baby full nodes with their addresses.
    pub baby_nodes: Vec<(NodeRef, Arc<BabyNode>)>,
    /// Light-client submission entry point.
    pub reporter: LightClientReporter<LoopbackFullNodeGossip>,
    /// Relay from the baby chain to the parent chain.
    pub relay: Arc<EvidenceRelayService>,
    /// Parent-chain evidence handler.
    pub parent: Arc<ParentNode>,
    /// Parent-chain staking module.
    pub staking: Arc<InMemoryStakingModule>,
    /// Packet channel into the parent node.
    pub packets: Arc<LoopbackPacketChannel>,
}

impl EvidenceNetwork {
    /// Validate `config` and build every subsystem over an empty baby
    /// chain history.
    pub fn new(config: NodeConfig) -> Result<Self, ConfigError> {
        let history = Arc::new(InMemoryChainHistory::new(config.baby_chain.clone()));
        Self::with_baby_history(config, history)
    }

    /// Validate `config` and build every subsystem, parent side first, over
    /// an existing baby chain history.
    pub fn with_baby_history(
        config: NodeConfig,
        baby_history: Arc<InMemoryChainHistory>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let history_chain = baby_history.chain_id();
        if history_chain != config.baby_chain {
            return Err(ConfigError::HistoryChainMismatch {
                expected: config.baby_chain.clone(),
                found: history_chain,
            });
        }
        let bus = Arc::new(InMemoryEventBus::new());

        // Parent chain
        let staking = Arc::new(InMemoryStakingModule::new());
        let parent = Arc::new(ParentEvidenceService::new(
            config.parent_evidence(),
            Arc::clone(&staking),
            bus.clone(),
        ));

        // Relay
        let packets = Arc::new(LoopbackPacketChannel::new(parent.clone()));
        let parent_directory = StaticNodeDirectory::new(
            (0..config.parent_nodes)
                .map(|i| NodeRef::new(format!("parent-{i}"), config.parent_chain.clone()))
                .collect(),
        );
        let router =
            StaticPortRouter::new().with_route(config.baby_chain.clone(), PortId::evidence());
        let relay = Arc::new(EvidenceRelayService::new(
            config.relay(),
            Arc::new(router),
            packets.clone(),
            Arc::new(LoopbackParentGossip::new(parent.clone())),
            Arc::new(parent_directory),
        ));

        // Baby chain
        let forwarder = Arc::new(RelayForwarder::new(relay.clone(), bus.clone()));
        let baby_config = config.baby_evidence();
        let mut gossip = LoopbackFullNodeGossip::new();
        let mut baby_nodes = Vec::with_capacity(config.baby_nodes);
        for i in 0..config.baby_nodes {
            let node_ref = NodeRef::new(format!("baby-{i}"), config.baby_chain.clone());
            let node = Arc::new(BabyEvidenceService::new(
                &baby_config,
                AttackClassifier::new(),
                baby_history.clone(),
                Arc::clone(&forwarder),
                bus.clone(),
            ));
            gossip = gossip.with_node(node_ref.node_id.clone(), node.clone());
            baby_nodes.push((node_ref, node));
        }
        let reporter = LightClientReporter::new(
            config.fault_model,
            Arc::new(HistoryTrustedHeaders::new(baby_history.clone())),
            Arc::new(gossip),
        );

        info!(
            baby = %config.baby_chain,
            parent = %config.parent_chain,
            baby_nodes = config.baby_nodes,
            parent_nodes = config.parent_nodes,
            "[runtime] Evidence network assembled"
        );

        Ok(Self {
            config,
            bus,
            baby_history,
            baby_nodes,
            reporter,
            relay,
            parent,
            staking,
            packets,
        })
    }

    /// Start relaying committed evidence on every baby block commit.
    pub fn spawn_commit_hook(&self) -> JoinHandle<()> {
        BlockCommitHook::new(
            self.config.baby_chain.clone(),
            self.relay.clone(),
            self.bus.clone(),
        )
        .spawn()
    }

    /// Start committing the staking module's pending evidence once per
    /// parent block.
    pub fn spawn_parent_blocks(&self) -> JoinHandle<()> {
        tokio::spawn(parent_block_task(
            Arc::clone(&self.staking),
            self.config.parent_block_interval,
        ))
    }

    /// Run the commit hook and parent block production until `shutdown`
    /// turns true or its sender is dropped.
    pub fn spawn_background(&self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        let mut hook = self.spawn_commit_hook();
        let mut blocks = self.spawn_parent_blocks();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut hook => break,
                    _ = &mut blocks => break,
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            info!("[runtime] Shutdown signal received");
                            break;
                        }
                    }
                }
            }
            hook.abort();
            blocks.abort();
        })
    }

    /// Announce a committed baby block carrying `evidence`, as baby
    /// consensus does at the beginning of the next block.
    pub async fn commit_baby_block(
        &self,
        height: Height,
        evidence: Vec<InternalEvidence>,
    ) -> usize {
        self.bus
            .publish(EvidenceEvent::BlockCommitted {
                chain: self.config.baby_chain.clone(),
                height,
                evidence,
            })
            .await
    }

    /// The `count` first baby nodes, as a light client would sample them.
    pub fn baby_sample(&self, count: usize) -> Vec<NodeRef> {
        self.baby_nodes
            .iter()
            .take(count)
            .map(|(node_ref, _)| node_ref.clone())
            .collect()
    }
}

/// Commit pending evidence every `interval`, as parent consensus does
/// when it finalizes a block.
pub async fn parent_block_task(staking: Arc<InMemoryStakingModule>, interval: Duration) {
    let mut blocks = tokio::time::interval(interval);
    blocks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        blocks.tick().await;
        let slashed = staking.commit_pending();
        if !slashed.is_empty() {
            info!(
                slashed = slashed.len(),
                "[ev-04] Parent block committed pending evidence"
            );
        }
    }
}
