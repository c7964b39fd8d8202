//! Block Commit Hook Adapter
//!
//! Begin-of-block trigger for the post-commitment path: every evidence
//! committed in a baby-chain block is handed to `evidence_committed`.

use crate::domain::CommittedRelay;
use crate::ports::EvidenceRelayApi;
use shared_bus::{EventFilter, EventPublisher, EventTopic, EvidenceEvent, InMemoryEventBus};
use shared_types::ChainId;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

/// Bus listener driving the post-commitment relay path.
pub struct BlockCommitHook<R: EvidenceRelayApi> {
    chain: ChainId,
    relay: Arc<R>,
    bus: Arc<InMemoryEventBus>,
}

impl<R: EvidenceRelayApi + 'static> BlockCommitHook<R> {
    /// Hook for blocks of `chain`.
    pub fn new(chain: ChainId, relay: Arc<R>, bus: Arc<InMemoryEventBus>) -> Self {
        Self { chain, relay, bus }
    }

    /// Relay the evidence of one block-commit notification.
    ///
    /// Events for other chains or of other kinds are ignored.
    pub async fn handle(&self, event: EvidenceEvent) -> Vec<CommittedRelay> {
        let EvidenceEvent::BlockCommitted {
            chain,
            height,
            evidence,
        } = event
        else {
            return Vec::new();
        };
        if chain != self.chain {
            debug!(chain = %chain, "Ignoring block of another chain");
            return Vec::new();
        }

        let mut relayed = Vec::with_capacity(evidence.len());
        for item in evidence {
            match self.relay.evidence_committed(item).await {
                Ok(outcome) => {
                    if let CommittedRelay::Sent {
                        evidence_hash,
                        sequence,
                    } = outcome
                    {
                        self.bus
                            .publish(EvidenceEvent::CommittedEvidenceRelayed {
                                chain: chain.clone(),
                                evidence_hash,
                                sequence,
                            })
                            .await;
                    }
                    relayed.push(outcome);
                }
                Err(e) => {
                    warn!(chain = %chain, height, "Failed to relay committed evidence: {}", e);
                }
            }
        }

        if !relayed.is_empty() {
            info!(
                chain = %chain,
                height,
                count = relayed.len(),
                "[ev-03] 🔗 Block evidence handed to relay"
            );
        }
        relayed
    }

    /// Subscribe to block commits and handle them until the bus closes.
    ///
    /// The subscription is taken before this returns, so no commit
    /// published afterwards is missed.
    pub fn spawn(self) -> JoinHandle<()> {
        let mut stream = self.bus.event_stream(
            EventFilter::topics(vec![EventTopic::Consensus]).on_chain(self.chain.clone()),
        );
        tokio::spawn(async move {
            while let Some(event) = stream.next().await {
                self.handle(event).await;
            }
            debug!("Block commit hook stopped");
        })
    }
}
