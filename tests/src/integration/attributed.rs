//! # Pre-Commitment Path
//!
//! Light client → baby full nodes → classifier → relay gossip → parent
//! `process_evidences` → slashing once the parent commits.
//!
//! ## Scenarios
//!
//! - **A (equivocation)**: canonical commit by {V1,V2,V3}, conflicting block
//!   in the same round by {V1,V2,V4}; V1 and V2 are slashed.
//! - **B (lunatic)**: conflicting block with fabricated app state signed by
//!   {V1,V5}, only V1 bonded at the common height; V1 alone is slashed.

#[cfg(test)]
mod tests {
    use crate::harness::{address, baby_chain, network};
    use ev_02_baby_evidence::{BabyEvidenceApi, LightClientReporterApi, SubmissionOutcome};
    use shared_bus::{EventFilter, EventTopic, EvidenceEvent};
    use shared_types::AttackKind;

    // =========================================================================
    // SCENARIO A: EQUIVOCATION
    // =========================================================================

    #[tokio::test]
    async fn test_equivocation_slashes_double_signers() {
        let (fixture, network) = network(&[1, 2, 3, 4], 10);
        fixture.set_commit(5, 2, &[1, 2, 3]);
        let evidence = fixture.equivocation(5, 3, 2, &[1, 2, 4]);

        let report = network
            .reporter
            .submit_light_client_attack_evidence(evidence, network.baby_sample(2))
            .await
            .unwrap();
        assert_eq!(report.attempted, 2);
        assert_eq!(report.delivered, 2);

        // Uncommitted evidence waits for the parent chain's own commit.
        assert!(network.staking.slashes().is_empty());
        assert_eq!(network.staking.pending_count(), 2);

        let slashed = network.staking.commit_pending();
        let mut validators: Vec<_> = slashed.iter().map(|s| s.validator).collect();
        validators.sort();
        assert_eq!(validators, vec![address(1), address(2)]);
        assert!(slashed.iter().all(|s| s.kind == AttackKind::Equivocation));
        assert!(slashed.iter().all(|s| s.chain == baby_chain()));
        assert!(!network.staking.is_slashed(&address(3), &baby_chain()));
        assert!(!network.staking.is_slashed(&address(4), &baby_chain()));
    }

    // =========================================================================
    // SCENARIO B: LUNATIC
    // =========================================================================

    #[tokio::test]
    async fn test_lunatic_slashes_only_bonded_signers() {
        let (fixture, network) = network(&[1, 2, 3], 10);
        let evidence = fixture.lunatic(7, 4, &[1, 5], &[1, 5]);

        network
            .reporter
            .submit_light_client_attack_evidence(evidence, network.baby_sample(2))
            .await
            .unwrap();
        let slashed = network.staking.commit_pending();

        assert_eq!(slashed.len(), 1);
        assert_eq!(slashed[0].validator, address(1));
        assert_eq!(slashed[0].kind, AttackKind::Lunatic);
        assert!(!network.staking.is_slashed(&address(5), &baby_chain()));
    }

    // =========================================================================
    // IDEMPOTENCE
    // =========================================================================

    #[tokio::test]
    async fn test_resubmission_to_same_node_relays_once() {
        let (fixture, network) = network(&[1, 2, 3, 4], 10);
        let evidence = fixture.lunatic(6, 3, &[2, 7], &[2, 7]);
        let mut relay_events = network
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Relay]));
        let node = &network.baby_nodes[0].1;

        let first = node
            .light_client_attack_evidence_submitted(evidence.clone())
            .await
            .unwrap();
        let second = node
            .light_client_attack_evidence_submitted(evidence.clone())
            .await
            .unwrap();

        assert!(first.is_forwarded());
        assert_eq!(
            second,
            SubmissionOutcome::Duplicate {
                evidence_id: evidence.id()
            }
        );

        let mut forwarded = 0;
        while let Ok(Some(event)) = relay_events.try_recv() {
            if matches!(event, EvidenceEvent::EvidenceForwarded { .. }) {
                forwarded += 1;
            }
        }
        assert_eq!(forwarded, 1);
    }

    #[tokio::test]
    async fn test_every_sampled_node_classifies_independently() {
        let (fixture, network) = network(&[1, 2, 3, 4], 10);
        let evidence = fixture.equivocation(4, 2, 0, &[3, 4]);
        let mut classified = network
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::BabyEvidence]));

        network
            .reporter
            .submit_light_client_attack_evidence(evidence.clone(), network.baby_sample(3))
            .await
            .unwrap();

        let mut count = 0;
        while let Ok(Some(EvidenceEvent::AttackClassified { kind, culprits, .. })) =
            classified.try_recv()
        {
            assert_eq!(kind, AttackKind::Equivocation);
            assert_eq!(culprits, 2);
            count += 1;
        }
        assert_eq!(count, 3);
        assert!(network.baby_nodes[..3]
            .iter()
            .all(|(_, node)| node.is_processed(&evidence.id())));
        assert!(!network.baby_nodes[3].1.is_processed(&evidence.id()));

        // The relay gossips the two records once for all three nodes.
        assert_eq!(network.staking.commit_pending().len(), 2);
    }
}
