//! # Attack Classifier Service
//!
//! Fetches the canonical view for an accusation, decides the attack kind
//! and extracts one attributable record per culprit.

use crate::adapters::{DeterministicFieldsCheck, UnavailableAmnesiaIsolator};
use crate::algorithms::{determine_attack_kind, equivocation_culprits, lunatic_culprits};
use crate::domain::{
    invariant_commit_finalizes, invariant_culprits_found, invariant_present, CanonicalView,
    Classification, ClassifierError, HistoryItem,
};
use crate::ports::{AmnesiaIsolator, AttackClassifierApi, ChainHistory, HeaderValidityCheck};
use shared_types::{AttackKind, InternalEvidence, LightClientAttackEvidence};
use tracing::{debug, info};

/// Stateless attack classifier.
///
/// Holds no history of its own; every call reads from the `ChainHistory`
/// passed in, so one instance may serve any number of chains.
pub struct AttackClassifier<V = DeterministicFieldsCheck, A = UnavailableAmnesiaIsolator> {
    validity: V,
    amnesia: A,
}

impl AttackClassifier {
    /// Classifier with the deterministic-fields validity rule and no amnesia
    /// isolation.
    pub fn new() -> Self {
        Self::with_parts(DeterministicFieldsCheck, UnavailableAmnesiaIsolator)
    }
}

impl Default for AttackClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: HeaderValidityCheck, A: AmnesiaIsolator> AttackClassifier<V, A> {
    /// Classifier with explicit validity rule and amnesia isolator.
    pub fn with_parts(validity: V, amnesia: A) -> Self {
        Self { validity, amnesia }
    }

    /// Load the canonical data the accusation is judged against.
    fn canonical_view(
        &self,
        evidence: &LightClientAttackEvidence,
        history: &dyn ChainHistory,
    ) -> Result<CanonicalView, ClassifierError> {
        let height = evidence.conflicting_height();
        let common = evidence.common_height;

        let reference = invariant_present(history.header_at(height), height, HistoryItem::Header)?;
        let reference_commit =
            invariant_present(history.commit_at(height + 1), height + 1, HistoryItem::Commit)?;
        let bonded_at_common = invariant_present(
            history.next_validators_at(common),
            common,
            HistoryItem::NextValidators,
        )?;

        invariant_commit_finalizes(&reference, &reference_commit)?;

        Ok(CanonicalView {
            reference,
            reference_commit,
            bonded_at_common,
        })
    }
}

impl<V: HeaderValidityCheck, A: AmnesiaIsolator> AttackClassifierApi for AttackClassifier<V, A> {
    fn classify(
        &self,
        evidence: &LightClientAttackEvidence,
        history: &dyn ChainHistory,
    ) -> Result<Classification, ClassifierError> {
        let expected = history.chain_id();
        if evidence.chain != expected {
            return Err(ClassifierError::WrongChain {
                expected,
                found: evidence.chain.clone(),
            });
        }
        evidence.validate_basic()?;

        let view = self.canonical_view(evidence, history)?;
        let conflicting = evidence.conflicting_block.header();
        if view.reference.hash() == conflicting.hash() {
            return Err(ClassifierError::NoConflict {
                height: conflicting.height,
            });
        }

        let kind = determine_attack_kind(
            self.validity.violates_validity(&view.reference, conflicting),
            view.reference_commit.round,
            evidence.conflicting_block.commit().round,
        );
        debug!(
            evidence_id = %evidence.id(),
            kind = %kind,
            "[ev-01] Attack kind determined"
        );

        let mut culprits: Vec<InternalEvidence> = match kind {
            AttackKind::Lunatic => lunatic_culprits(evidence, &view),
            AttackKind::Equivocation => equivocation_culprits(evidence, &view),
            AttackKind::Amnesia => self.amnesia.isolate(evidence, history)?,
        };
        culprits.sort_by(|a, b| a.culprit().cmp(&b.culprit()));
        culprits.dedup_by(|a, b| a.culprit() == b.culprit());

        invariant_culprits_found(kind, &culprits)?;

        info!(
            evidence_id = %evidence.id(),
            chain = %evidence.chain,
            height = conflicting.height,
            kind = %kind,
            culprits = culprits.len(),
            "[ev-01] Light client attack classified"
        );

        Ok(Classification {
            kind,
            evidence: culprits,
        })
    }
}
