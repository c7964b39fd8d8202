//! # Domain Invariants
//!
//! Rules every classification must satisfy before its output leaves the
//! classifier.

use super::errors::{ClassifierError, HistoryItem};
use shared_types::{AttackKind, Commit, Header, Height, InternalEvidence};
use tracing::error;

/// Invariant: an attack branch never silently yields nothing.
///
/// An empty culprit set means either a classifier bug or an unseen attack
/// shape; it is surfaced, never treated as "no misbehavior".
pub fn invariant_culprits_found(
    kind: AttackKind,
    evidence: &[InternalEvidence],
) -> Result<(), ClassifierError> {
    if evidence.is_empty() {
        error!(kind = %kind, "Classification anomaly: attack branch yielded no culprits");
        return Err(ClassifierError::NoCulprits { kind });
    }
    Ok(())
}

/// Invariant: the canonical commit finalizes the canonical header.
pub fn invariant_commit_finalizes(
    reference: &Header,
    commit: &Commit,
) -> Result<(), ClassifierError> {
    if commit.height != reference.height || commit.block_id != reference.block_id() {
        return Err(ClassifierError::InconsistentHistory {
            height: reference.height,
            reason: "canonical commit does not finalize canonical header".to_string(),
        });
    }
    Ok(())
}

/// Invariant: required history is present.
pub fn invariant_present<T>(
    value: Option<T>,
    height: Height,
    item: HistoryItem,
) -> Result<T, ClassifierError> {
    value.ok_or(ClassifierError::MissingHistory { height, item })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{BlockId, ChainId};

    fn header(height: Height) -> Header {
        Header {
            chain_id: ChainId::new("baby"),
            height,
            time: 0,
            last_block_id: BlockId::default(),
            validators_hash: [0u8; 32],
            next_validators_hash: [0u8; 32],
            consensus_hash: [0u8; 32],
            app_hash: [0u8; 32],
            last_results_hash: [0u8; 32],
            proposer_address: [0u8; 20],
        }
    }

    #[test]
    fn test_empty_culprits_rejected() {
        assert!(matches!(
            invariant_culprits_found(AttackKind::Lunatic, &[]),
            Err(ClassifierError::NoCulprits {
                kind: AttackKind::Lunatic
            })
        ));
    }

    #[test]
    fn test_commit_must_finalize_reference() {
        let h = header(5);
        let good = Commit {
            height: 5,
            round: 0,
            block_id: h.block_id(),
            signatures: vec![],
        };
        assert!(invariant_commit_finalizes(&h, &good).is_ok());

        let wrong_block = Commit {
            block_id: BlockId::new([1u8; 32]),
            ..good
        };
        assert!(invariant_commit_finalizes(&h, &wrong_block).is_err());
    }

    #[test]
    fn test_present() {
        assert_eq!(invariant_present(Some(3), 1, HistoryItem::Header).unwrap(), 3);
        assert!(matches!(
            invariant_present::<u8>(None, 9, HistoryItem::NextValidators),
            Err(ClassifierError::MissingHistory { height: 9, .. })
        ));
    }
}
