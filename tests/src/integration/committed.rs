//! # Post-Commitment Path
//!
//! Baby block commit → `BlockCommitHook` → `CommittedEvidencePacket` on the
//! evidence port → parent `on_recv_packet` → `submit_evidence` → immediate
//! slashing (scenario C).

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::harness::{address, baby_chain, eventually, network};
    use ev_01_attack_classifier::{AttackClassifier, AttackClassifierApi};
    use ev_02_baby_evidence::LightClientReporterApi;
    use ev_03_evidence_relay::Acknowledgment;
    use shared_bus::{EventFilter, EventPublisher, EventTopic, EvidenceEvent};
    use shared_types::{ChainId, InternalEvidence};

    fn classified_equivocation(
        fixture: &ev_01_attack_classifier::fixtures::ChainFixture,
    ) -> Vec<InternalEvidence> {
        fixture.set_commit(5, 2, &[1, 2, 3]);
        let evidence = fixture.equivocation(5, 3, 2, &[1, 2, 4]);
        AttackClassifier::new()
            .classify(&evidence, fixture.history().as_ref())
            .unwrap()
            .evidence
    }

    #[tokio::test]
    async fn test_committed_evidence_slashes_immediately() {
        let (fixture, network) = network(&[1, 2, 3, 4], 10);
        let committed = classified_equivocation(&fixture);
        let hook = network.spawn_commit_hook();

        network.commit_baby_block(11, committed).await;

        let staking = network.staking.clone();
        assert!(eventually(|| staking.slashes().len() == 2).await);
        assert!(network.staking.is_slashed(&address(1), &baby_chain()));
        assert!(network.staking.is_slashed(&address(2), &baby_chain()));
        assert_eq!(network.staking.pending_count(), 0);

        let acks = network.packets.acknowledgments();
        assert_eq!(
            acks,
            vec![(1, Acknowledgment::success()), (2, Acknowledgment::success())]
        );
        hook.abort();
    }

    #[tokio::test]
    async fn test_recommitted_evidence_sends_no_second_packet() {
        let (fixture, network) = network(&[1, 2, 3, 4], 10);
        let committed = classified_equivocation(&fixture);
        let mut relayed = network
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Relay]));
        let hook = network.spawn_commit_hook();

        network.commit_baby_block(11, committed.clone()).await;
        let relay = network.relay.clone();
        assert!(eventually(|| relay.last_sequence() == 2).await);

        network.commit_baby_block(12, committed).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(network.relay.last_sequence(), 2);
        assert_eq!(network.packets.acknowledgments().len(), 2);
        assert_eq!(network.staking.slashes().len(), 2);

        let mut sequences = Vec::new();
        while let Ok(Some(event)) = relayed.try_recv() {
            if let EvidenceEvent::CommittedEvidenceRelayed { sequence, .. } = event {
                sequences.push(sequence);
            }
        }
        assert_eq!(sequences, vec![1, 2]);
        hook.abort();
    }

    #[tokio::test]
    async fn test_both_paths_slash_each_validator_once() {
        let (fixture, network) = network(&[1, 2, 3, 4], 10);
        let committed = classified_equivocation(&fixture);
        let evidence = fixture.equivocation(5, 3, 2, &[1, 2, 4]);
        let hook = network.spawn_commit_hook();

        // Pre-commitment path first: parked until the parent commits.
        network
            .reporter
            .submit_light_client_attack_evidence(evidence, network.baby_sample(2))
            .await
            .unwrap();
        assert_eq!(network.staking.pending_count(), 2);

        // The baby chain commits the same records; the packet path slashes.
        network.commit_baby_block(11, committed).await;
        let staking = network.staking.clone();
        assert!(eventually(|| staking.slashes().len() == 2).await);

        // The parent's own commit of the gossiped copies adds nothing.
        assert!(network.staking.commit_pending().is_empty());
        assert_eq!(network.staking.slashes().len(), 2);
        hook.abort();
    }

    #[tokio::test]
    async fn test_block_of_another_chain_ignored() {
        let (fixture, network) = network(&[1, 2, 3, 4], 10);
        let committed = classified_equivocation(&fixture);
        let hook = network.spawn_commit_hook();

        network
            .bus
            .publish(EvidenceEvent::BlockCommitted {
                chain: ChainId::new("root/other"),
                height: 11,
                evidence: committed,
            })
            .await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(network.relay.last_sequence(), 0);
        assert!(network.staking.slashes().is_empty());
        hook.abort();
    }
}
