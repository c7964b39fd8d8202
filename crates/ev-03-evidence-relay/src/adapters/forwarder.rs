//! Relay Forwarder Adapter
//!
//! Implements the baby-chain handler's `EvidenceForwarder` port on top of
//! the pre-commitment relay path.

use crate::ports::EvidenceRelayApi;
use async_trait::async_trait;
use ev_02_baby_evidence::{BabyEvidenceError, DeliveryReport, EvidenceForwarder};
use shared_bus::{EventPublisher, EvidenceEvent};
use shared_types::InternalEvidence;
use std::sync::Arc;

/// Forwards classified evidence through a relay and reports the fan-out on
/// the event bus.
pub struct RelayForwarder<R: EvidenceRelayApi> {
    relay: Arc<R>,
    bus: Arc<dyn EventPublisher>,
}

impl<R: EvidenceRelayApi> RelayForwarder<R> {
    /// Wrap `relay`.
    pub fn new(relay: Arc<R>, bus: Arc<dyn EventPublisher>) -> Self {
        Self { relay, bus }
    }
}

#[async_trait]
impl<R: EvidenceRelayApi + 'static> EvidenceForwarder for RelayForwarder<R> {
    async fn forward(
        &self,
        evidences: Vec<InternalEvidence>,
    ) -> Result<DeliveryReport, BabyEvidenceError> {
        let count = evidences.len();
        let chain = evidences.first().map(|e| e.chain.clone());
        let receipt = self
            .relay
            .relay_attributed(evidences)
            .await
            .map_err(|e| BabyEvidenceError::Forwarding(e.to_string()))?;

        if let Some(chain) = chain {
            self.bus
                .publish(EvidenceEvent::EvidenceForwarded {
                    chain,
                    count,
                    attempted: receipt.attempted,
                    delivered: receipt.delivered,
                })
                .await;
        }

        Ok(DeliveryReport {
            attempted: receipt.attempted,
            delivered: receipt.delivered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{StaticNodeDirectory, StaticPortRouter};
    use crate::config::RelayConfig;
    use crate::ports::{MockPacketChannel, MockParentNodeGossip};
    use crate::service::EvidenceRelayService;
    use shared_bus::{EventFilter, EventTopic, InMemoryEventBus};
    use shared_types::{ChainId, Misbehavior, NodeRef, Validator};

    fn relay(parent_nodes: usize) -> Arc<EvidenceRelayService> {
        Arc::new(EvidenceRelayService::new(
            RelayConfig::for_testing(),
            Arc::new(StaticPortRouter::new()),
            Arc::new(MockPacketChannel::default()),
            Arc::new(MockParentNodeGossip::default()),
            Arc::new(StaticNodeDirectory::new(
                (0..parent_nodes)
                    .map(|i| NodeRef::new(format!("parent-{i}"), ChainId::new("root")))
                    .collect(),
            )),
        ))
    }

    fn evidence() -> InternalEvidence {
        InternalEvidence::new(
            Misbehavior::Amnesia {
                height: 3,
                proof: vec![],
            },
            Validator::new([1u8; 20], vec![1u8; 32], 10),
            ChainId::new("root/baby"),
        )
    }

    #[tokio::test]
    async fn test_forward_publishes_fan_out() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut events = bus.subscribe(EventFilter::topics(vec![EventTopic::Relay]));
        let forwarder = RelayForwarder::new(relay(3), bus.clone());

        let report = forwarder.forward(vec![evidence()]).await.unwrap();

        assert_eq!(report, DeliveryReport { attempted: 2, delivered: 2 });
        assert!(matches!(
            events.try_recv().unwrap(),
            Some(EvidenceEvent::EvidenceForwarded { count: 1, delivered: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_relay_error_maps_to_forwarding() {
        let forwarder = RelayForwarder::new(relay(1), Arc::new(InMemoryEventBus::new()));

        let err = forwarder.forward(vec![evidence()]).await.unwrap_err();

        assert!(matches!(err, BabyEvidenceError::Forwarding(_)));
        assert!(err.is_retryable());
    }
}
