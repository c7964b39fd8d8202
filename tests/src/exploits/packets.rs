//! # Packet Attacks
//!
//! Packets reaching the parent chain's evidence port that must not reach
//! `submit_evidence`: foreign packet types, garbage data, misrouting,
//! evidence smuggled under another chain's name, and replays.

#[cfg(test)]
mod tests {
    use crate::harness::{address, baby_chain, network};
    use ev_01_attack_classifier::{AttackClassifier, AttackClassifierApi};
    use ev_03_evidence_relay::{
        encode_committed_evidence, Acknowledgment, CommittedEvidencePacket, Packet, PortId,
    };
    use ev_04_parent_evidence::{ParentEvidenceApi, ParentEvidenceError};
    use shared_types::{ChainId, InternalEvidence};

    fn attributed(fixture: &ev_01_attack_classifier::fixtures::ChainFixture) -> InternalEvidence {
        let evidence = fixture.lunatic(6, 4, &[1, 9], &[1, 9]);
        let mut culprits = AttackClassifier::new()
            .classify(&evidence, fixture.history().as_ref())
            .unwrap()
            .evidence;
        culprits.remove(0)
    }

    fn packet(sequence: u64, data: Vec<u8>) -> Packet {
        Packet {
            sequence,
            source_chain: baby_chain(),
            destination_chain: ChainId::new("root"),
            destination_port: PortId::evidence(),
            data,
        }
    }

    fn committed_packet(sequence: u64, evidence: InternalEvidence) -> Packet {
        packet(
            sequence,
            encode_committed_evidence(CommittedEvidencePacket { evidence }).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_foreign_packet_type_never_slashes() {
        let (_fixture, network) = network(&[1, 2, 3], 10);
        let data = serde_json::to_vec(&serde_json::json!({
            "type": "fungible_token",
            "denom": "stake",
            "amount": "1000",
        }))
        .unwrap();

        let ack = network.parent.on_recv_packet(packet(1, data)).await;

        assert!(matches!(ack, Acknowledgment::Error(reason) if reason.contains("fungible_token")));
        assert!(network.staking.slashes().is_empty());
    }

    #[tokio::test]
    async fn test_garbage_data_negative_ack() {
        let (_fixture, network) = network(&[1, 2, 3], 10);

        for data in [b"not json".to_vec(), br#"{"evidence":{}}"#.to_vec(), Vec::new()] {
            let ack = network.parent.on_recv_packet(packet(1, data)).await;
            assert!(!ack.is_success());
        }
        assert!(network.staking.slashes().is_empty());
    }

    #[tokio::test]
    async fn test_truncated_committed_evidence_negative_ack() {
        let (_fixture, network) = network(&[1, 2, 3], 10);
        let data = br#"{"type":"committed_evidence","evidence":{"chain":"root/baby"}}"#.to_vec();

        let ack = network.parent.on_recv_packet(packet(1, data)).await;

        assert!(matches!(ack, Acknowledgment::Error(reason) if reason.contains("decoding")));
        assert!(network.staking.slashes().is_empty());
    }

    #[tokio::test]
    async fn test_misrouted_packet_negative_ack() {
        let (fixture, network) = network(&[1, 2, 3], 10);
        let evidence = attributed(&fixture);

        let mut wrong_port = committed_packet(1, evidence.clone());
        wrong_port.destination_port = PortId::new("transfer");
        let mut wrong_chain = committed_packet(2, evidence);
        wrong_chain.destination_chain = ChainId::new("elsewhere");

        assert!(!network.parent.on_recv_packet(wrong_port).await.is_success());
        assert!(!network.parent.on_recv_packet(wrong_chain).await.is_success());
        assert!(network.staking.slashes().is_empty());
    }

    #[tokio::test]
    async fn test_evidence_under_borrowed_chain_name_rejected() {
        let (fixture, network) = network(&[1, 2, 3], 10);
        let mut smuggled = attributed(&fixture);
        smuggled.chain = ChainId::new("root/other");

        let ack = network
            .parent
            .on_recv_packet(committed_packet(1, smuggled))
            .await;

        assert!(!ack.is_success());
        assert!(network.staking.slashes().is_empty());
    }

    #[tokio::test]
    async fn test_replayed_packet_slashes_once() {
        let (fixture, network) = network(&[1, 2, 3], 10);
        let replayed = committed_packet(1, attributed(&fixture));

        for _ in 0..3 {
            let ack = network.parent.on_recv_packet(replayed.clone()).await;
            assert_eq!(ack, Acknowledgment::success());
        }

        assert_eq!(network.staking.slashes().len(), 1);
        assert!(network.staking.is_slashed(&address(1), &baby_chain()));
    }

    #[tokio::test]
    async fn test_gossip_from_unregistered_chain_rejected() {
        let (fixture, network) = network(&[1, 2, 3], 10);
        let mut foreign = attributed(&fixture);
        foreign.chain = ChainId::new("root/other");

        let err = network
            .parent
            .evidence_of_misbehaviors_submitted(vec![foreign])
            .await
            .unwrap_err();

        assert!(matches!(err, ParentEvidenceError::UnregisteredChain(_)));
        assert_eq!(network.staking.pending_count(), 0);
    }
}
