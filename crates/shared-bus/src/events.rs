//! # Evidence Events
//!
//! The bus carries the block-commit notifications that drive the
//! post-commitment relay path, progress events of both evidence paths and
//! anomaly alerts routed to the dead letter queue.

use serde::{Deserialize, Serialize};
use shared_types::{AttackKind, ChainId, EvidenceId, Hash, Height, InternalEvidence};

/// Subsystem identifiers used as event sources.
pub mod subsystem {
    /// Baby-chain consensus (block commit notifications).
    pub const BABY_CONSENSUS: u8 = 0;
    /// Attack classifier.
    pub const ATTACK_CLASSIFIER: u8 = 1;
    /// Baby-chain evidence handler.
    pub const BABY_EVIDENCE: u8 = 2;
    /// Cross-chain evidence relay.
    pub const EVIDENCE_RELAY: u8 = 3;
    /// Parent-chain evidence handler.
    pub const PARENT_EVIDENCE: u8 = 4;
}

/// Everything the evidence subsystems tell each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EvidenceEvent {
    // =========================================================================
    // BABY-CHAIN CONSENSUS
    // =========================================================================
    /// A baby-chain block was committed together with the evidence it includes.
    /// Triggers the post-commitment relay path.
    BlockCommitted {
        /// Chain the block belongs to.
        chain: ChainId,
        /// Committed height.
        height: Height,
        /// Evidence committed in the block.
        evidence: Vec<InternalEvidence>,
    },

    // =========================================================================
    // BABY-CHAIN EVIDENCE HANDLER
    // =========================================================================
    /// A light-client accusation was classified.
    AttackClassified {
        /// Accusation identity.
        evidence_id: EvidenceId,
        /// Chain under attack.
        chain: ChainId,
        /// Attack class.
        kind: AttackKind,
        /// Number of culprits found.
        culprits: usize,
    },

    // =========================================================================
    // EVIDENCE RELAY
    // =========================================================================
    /// Attributed (uncommitted) evidence was sent to parent full nodes.
    EvidenceForwarded {
        /// Chain the evidence pertains to.
        chain: ChainId,
        /// Number of evidence records.
        count: usize,
        /// Parent nodes the send was attempted to.
        attempted: usize,
        /// Parent nodes that accepted the send.
        delivered: usize,
    },

    /// Committed evidence was sent over the inter-chain channel.
    CommittedEvidenceRelayed {
        /// Chain the evidence pertains to.
        chain: ChainId,
        /// Evidence content hash.
        evidence_hash: Hash,
        /// Packet sequence number.
        sequence: u64,
    },

    // =========================================================================
    // PARENT-CHAIN EVIDENCE HANDLER
    // =========================================================================
    /// Evidence was handed to the staking module.
    EvidenceHandedToStaking {
        /// Chain the evidence pertains to.
        chain: ChainId,
        /// Number of records.
        count: usize,
        /// Whether the records were already committed.
        committed: bool,
    },

    // =========================================================================
    // DEAD LETTERS
    // =========================================================================
    /// An attack branch produced no culprits.
    ClassificationAnomaly {
        /// Accusation identity.
        evidence_id: EvidenceId,
        /// Chain under attack.
        chain: ChainId,
        /// Branch that came up empty.
        kind: AttackKind,
    },

    /// A subsystem hit a failure it cannot recover from on its own.
    CriticalError {
        /// Reporting subsystem, one of [`subsystem`].
        subsystem_id: u8,
        /// Operator-facing description.
        error: String,
    },
}

impl EvidenceEvent {
    /// Topic the event is published on.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::BlockCommitted { .. } => EventTopic::Consensus,
            Self::AttackClassified { .. } => EventTopic::BabyEvidence,
            Self::EvidenceForwarded { .. } | Self::CommittedEvidenceRelayed { .. } => {
                EventTopic::Relay
            }
            Self::EvidenceHandedToStaking { .. } => EventTopic::ParentEvidence,
            Self::ClassificationAnomaly { .. } | Self::CriticalError { .. } => {
                EventTopic::DeadLetterQueue
            }
        }
    }

    /// Subsystem that emits this kind of event.
    #[must_use]
    pub fn source_subsystem(&self) -> u8 {
        match self {
            Self::BlockCommitted { .. } => subsystem::BABY_CONSENSUS,
            Self::ClassificationAnomaly { .. } => subsystem::ATTACK_CLASSIFIER,
            Self::AttackClassified { .. } => subsystem::BABY_EVIDENCE,
            Self::EvidenceForwarded { .. } | Self::CommittedEvidenceRelayed { .. } => {
                subsystem::EVIDENCE_RELAY
            }
            Self::EvidenceHandedToStaking { .. } => subsystem::PARENT_EVIDENCE,
            Self::CriticalError { subsystem_id, .. } => *subsystem_id,
        }
    }

    /// Chain the event concerns. `CriticalError` is chain-less.
    #[must_use]
    pub fn chain(&self) -> Option<&ChainId> {
        match self {
            Self::BlockCommitted { chain, .. }
            | Self::AttackClassified { chain, .. }
            | Self::EvidenceForwarded { chain, .. }
            | Self::CommittedEvidenceRelayed { chain, .. }
            | Self::EvidenceHandedToStaking { chain, .. }
            | Self::ClassificationAnomaly { chain, .. } => Some(chain),
            Self::CriticalError { .. } => None,
        }
    }
}

/// Coarse routing key for subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Baby-chain block commits.
    Consensus,
    /// Classification results on baby full nodes.
    BabyEvidence,
    /// Both relay paths.
    Relay,
    /// Staking handoffs on the parent chain.
    ParentEvidence,
    /// Anomalies and critical errors.
    DeadLetterQueue,
    /// Wildcard; matches every topic when listed in a filter.
    All,
}

/// Subscription filter. Each empty list places no constraint.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Accepted topics.
    pub topics: Vec<EventTopic>,
    /// Accepted source subsystems.
    pub source_subsystems: Vec<u8>,
    /// Accepted chains. Chain-less events only pass an unconstrained filter.
    pub chains: Vec<ChainId>,
}

impl EventFilter {
    /// Accept everything.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Accept only `topics`.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            ..Self::default()
        }
    }

    /// Accept only events emitted by `subsystems`.
    #[must_use]
    pub fn from_subsystems(subsystems: Vec<u8>) -> Self {
        Self {
            source_subsystems: subsystems,
            ..Self::default()
        }
    }

    /// Additionally require the event to concern `chain`.
    #[must_use]
    pub fn on_chain(mut self, chain: ChainId) -> Self {
        self.chains.push(chain);
        self
    }

    /// Whether `event` passes every constraint.
    #[must_use]
    pub fn matches(&self, event: &EvidenceEvent) -> bool {
        let topic = event.topic();
        let topic_ok = self.topics.is_empty()
            || self
                .topics
                .iter()
                .any(|t| *t == EventTopic::All || *t == topic);
        let source_ok = self.source_subsystems.is_empty()
            || self.source_subsystems.contains(&event.source_subsystem());
        let chain_ok = self.chains.is_empty()
            || event.chain().is_some_and(|c| self.chains.contains(c));

        topic_ok && source_ok && chain_ok
    }
}
