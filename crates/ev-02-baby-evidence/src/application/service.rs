//! # Baby Evidence Service
//!
//! Full-node side of the submission flow: classify, then forward.

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::BabyEvidenceConfig;
use crate::domain::{BabyEvidenceError, SubmissionOutcome};
use crate::ports::{BabyEvidenceApi, EvidenceForwarder};
use ev_01_attack_classifier::{AttackClassifierApi, ChainHistory, ClassifierError};
use shared_bus::{EventPublisher, EvidenceEvent};
use shared_types::{EvidenceId, LightClientAttackEvidence};

/// Baby-chain evidence service.
///
/// Each processed evidence id is reserved in an LRU before classification
/// and released again if classification or forwarding fails.
///
/// The LRU holds at most `dedup_cache_size` ids. An id evicted from it is
/// classified and forwarded again on resubmission; the relay and the
/// staking module's dedup by evidence hash and by offence keep that from
/// slashing twice.
pub struct BabyEvidenceService<C: AttackClassifierApi, F: EvidenceForwarder> {
    /// Classifier.
    classifier: C,
    /// Canonical history of this node's chain.
    history: Arc<dyn ChainHistory>,
    /// Relay toward the parent chain.
    forwarder: Arc<F>,
    /// Event bus.
    bus: Arc<dyn EventPublisher>,
    /// Processed evidence ids.
    processed: Mutex<LruCache<EvidenceId, ()>>,
}

impl<C: AttackClassifierApi, F: EvidenceForwarder> BabyEvidenceService<C, F> {
    /// Create a new baby evidence service.
    pub fn new(
        config: &BabyEvidenceConfig,
        classifier: C,
        history: Arc<dyn ChainHistory>,
        forwarder: Arc<F>,
        bus: Arc<dyn EventPublisher>,
    ) -> Self {
        let cache_size = NonZeroUsize::new(config.dedup_cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            classifier,
            history,
            forwarder,
            bus,
            processed: Mutex::new(LruCache::new(cache_size)),
        }
    }

    /// Whether `id` has been processed (or is being processed).
    pub fn is_processed(&self, id: &EvidenceId) -> bool {
        self.processed.lock().contains(id)
    }

    /// Internal: claim `id`. Returns `false` if it was already claimed.
    fn reserve(&self, id: EvidenceId) -> bool {
        let mut processed = self.processed.lock();
        if processed.contains(&id) {
            return false;
        }
        processed.put(id, ());
        true
    }

    /// Internal: give `id` back so a later resubmission is processed.
    fn release(&self, id: &EvidenceId) {
        self.processed.lock().pop(id);
    }

    /// Internal: route a classifier failure to the log and, for anomalies,
    /// to the dead letter queue.
    async fn report_classifier_error(
        &self,
        evidence: &LightClientAttackEvidence,
        err: &ClassifierError,
    ) {
        let evidence_id = evidence.id();
        match err {
            ClassifierError::NoCulprits { kind } => {
                error!(
                    evidence_id = %evidence_id,
                    chain = %evidence.chain,
                    kind = %kind,
                    "[ev-02] 🚨 Classification anomaly, alerting"
                );
                self.bus
                    .publish(EvidenceEvent::ClassificationAnomaly {
                        evidence_id,
                        chain: evidence.chain.clone(),
                        kind: *kind,
                    })
                    .await;
            }
            ClassifierError::InconsistentHistory { .. } => {
                error!(evidence_id = %evidence_id, "[ev-02] 🚨 {}", err);
                self.bus
                    .publish(EvidenceEvent::CriticalError {
                        subsystem_id: shared_bus::subsystem::ATTACK_CLASSIFIER,
                        error: err.to_string(),
                    })
                    .await;
            }
            _ if err.is_retryable() => {
                warn!(evidence_id = %evidence_id, "Classification deferred: {}", err);
            }
            _ => {
                warn!(evidence_id = %evidence_id, "Evidence rejected: {}", err);
            }
        }
    }
}

#[async_trait]
impl<C, F> BabyEvidenceApi for BabyEvidenceService<C, F>
where
    C: AttackClassifierApi + 'static,
    F: EvidenceForwarder + 'static,
{
    async fn light_client_attack_evidence_submitted(
        &self,
        evidence: LightClientAttackEvidence,
    ) -> Result<SubmissionOutcome, BabyEvidenceError> {
        let evidence_id = evidence.id();
        if !self.reserve(evidence_id) {
            debug!(evidence_id = %evidence_id, "Duplicate evidence ignored");
            return Ok(SubmissionOutcome::Duplicate { evidence_id });
        }

        let classification = match self.classifier.classify(&evidence, self.history.as_ref()) {
            Ok(classification) => classification,
            Err(err) => {
                self.release(&evidence_id);
                self.report_classifier_error(&evidence, &err).await;
                return Err(err.into());
            }
        };

        let kind = classification.kind;
        let culprits = classification.culprit_count();
        self.bus
            .publish(EvidenceEvent::AttackClassified {
                evidence_id,
                chain: evidence.chain.clone(),
                kind,
                culprits,
            })
            .await;

        let delivery = match self.forwarder.forward(classification.evidence).await {
            Ok(delivery) => delivery,
            Err(err) => {
                self.release(&evidence_id);
                warn!(evidence_id = %evidence_id, "Forwarding failed: {}", err);
                return Err(err);
            }
        };

        info!(
            evidence_id = %evidence_id,
            chain = %evidence.chain,
            kind = %kind,
            culprits,
            delivered = delivery.delivered,
            "[ev-02] ✓ Attributed evidence forwarded to parent chain"
        );

        Ok(SubmissionOutcome::Forwarded {
            evidence_id,
            kind,
            culprits,
            delivery,
        })
    }
}
