//! # Bogus Accusations
//!
//! Light-client submissions that must not lead to a slash: unreachable
//! samples, accusations of attacks that never happened, and accusations
//! the classifier cannot attribute.

#[cfg(test)]
mod tests {
    use crate::harness::{baby_chain, network};
    use ev_01_attack_classifier::fixtures::ChainFixture;
    use ev_02_baby_evidence::{BabyEvidenceApi, BabyEvidenceError, LightClientReporterApi};
    use shared_bus::{EventFilter, EventTopic, EvidenceEvent};
    use shared_types::{AttackKind, ChainId, NodeRef};

    #[tokio::test]
    async fn test_sample_too_small_to_reach_correct_node() {
        let (fixture, network) = network(&[1, 2, 3, 4], 10);
        let evidence = fixture.equivocation(5, 3, 0, &[1, 2]);

        let err = network
            .reporter
            .submit_light_client_attack_evidence(evidence.clone(), network.baby_sample(1))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BabyEvidenceError::SampleTooSmall {
                got: 1,
                required: 2
            }
        ));
        assert!(err.is_precondition_violation());
        assert!(!network.baby_nodes[0].1.is_processed(&evidence.id()));
    }

    #[tokio::test]
    async fn test_sample_padded_with_parent_node() {
        let (fixture, network) = network(&[1, 2, 3, 4], 10);
        let evidence = fixture.equivocation(5, 3, 0, &[1, 2]);
        let mut sample = network.baby_sample(1);
        sample.push(NodeRef::new("parent-0", ChainId::new("root")));

        let err = network
            .reporter
            .submit_light_client_attack_evidence(evidence, sample)
            .await
            .unwrap_err();

        assert!(matches!(err, BabyEvidenceError::ForeignNode { .. }));
    }

    #[tokio::test]
    async fn test_canonical_block_is_not_an_attack() {
        let (fixture, network) = network(&[1, 2, 3, 4], 10);
        let evidence = fixture.canonical_as_evidence(6, 3);

        let err = network
            .reporter
            .submit_light_client_attack_evidence(evidence, network.baby_sample(2))
            .await
            .unwrap_err();

        assert!(matches!(err, BabyEvidenceError::NoAttack { height: 6 }));
        assert!(network.staking.commit_pending().is_empty());
    }

    #[tokio::test]
    async fn test_accusation_beyond_trusted_headers() {
        let (_fixture, network) = network(&[1, 2, 3, 4], 10);
        let ahead = ChainFixture::new(baby_chain(), &[1, 2, 3, 4], 14);
        let evidence = ahead.equivocation(13, 9, 0, &[1, 2]);

        let err = network
            .reporter
            .submit_light_client_attack_evidence(evidence, network.baby_sample(2))
            .await
            .unwrap_err();

        assert!(matches!(err, BabyEvidenceError::NoTrustedHeader { height: 13 }));
    }

    #[tokio::test]
    async fn test_unattributable_equivocation_raises_anomaly() {
        let (fixture, network) = network(&[1, 2, 3, 4], 10);
        fixture.set_commit(5, 1, &[1, 2]);
        let evidence = fixture.equivocation(5, 3, 1, &[3, 4]);
        let mut dlq = network
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::DeadLetterQueue]));

        // Delivery succeeds; each node finds no double signer.
        let report = network
            .reporter
            .submit_light_client_attack_evidence(evidence.clone(), network.baby_sample(2))
            .await
            .unwrap();
        assert_eq!(report.delivered, 2);

        let mut anomalies = 0;
        while let Ok(Some(event)) = dlq.try_recv() {
            if let EvidenceEvent::ClassificationAnomaly { evidence_id, kind, .. } = event {
                assert_eq!(evidence_id, evidence.id());
                assert_eq!(kind, AttackKind::Equivocation);
                anomalies += 1;
            }
        }
        assert_eq!(anomalies, 2);
        assert!(network.staking.commit_pending().is_empty());
    }

    #[tokio::test]
    async fn test_amnesia_not_guessed() {
        let (fixture, network) = network(&[1, 2, 3, 4], 10);
        let evidence = fixture.amnesia(5, 3, &[1, 2, 3]);
        let node = &network.baby_nodes[0].1;

        let err = node
            .light_client_attack_evidence_submitted(evidence.clone())
            .await
            .unwrap_err();

        assert!(matches!(err, BabyEvidenceError::Classification(_)));
        assert!(!node.is_processed(&evidence.id()));
        assert!(network.staking.commit_pending().is_empty());
    }

    #[tokio::test]
    async fn test_accusation_for_another_chain_rejected_by_node() {
        let (_fixture, network) = network(&[1, 2, 3, 4], 10);
        let other = ChainFixture::new(ChainId::new("root/other"), &[1, 2, 3, 4], 10);
        let evidence = other.equivocation(5, 3, 0, &[1, 2]);

        let err = network.baby_nodes[0]
            .1
            .light_client_attack_evidence_submitted(evidence)
            .await
            .unwrap_err();

        assert!(err.is_precondition_violation());
        assert!(!err.is_retryable());
        assert!(network.staking.commit_pending().is_empty());
    }
}
