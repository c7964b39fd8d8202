//! # Culprit Extraction
//!
//! Turns a conflicting block plus canonical data into one attributable
//! record per misbehaving validator.
//!
//! Both functions iterate `BTreeSet`s of addresses, so output is ordered by
//! validator address.

use crate::domain::CanonicalView;
use shared_types::{InternalEvidence, LightClientAttackEvidence, Misbehavior};
use tracing::debug;

/// Lunatic attack: every validator bonded at the common height that signed
/// the fabricated block.
///
/// Signers outside the bonded snapshot were never trusted by the light
/// client and carry no stake on this chain; they are dropped.
pub fn lunatic_culprits(
    evidence: &LightClientAttackEvidence,
    view: &CanonicalView,
) -> Vec<InternalEvidence> {
    let conflicting = evidence.conflicting_block.commit();
    let header = evidence.conflicting_block.header();

    conflicting
        .signers()
        .into_iter()
        .filter_map(|address| {
            let validator = view.bonded_at_common.get(&address)?;
            let signature = conflicting.signature_of(&address)?;
            Some(InternalEvidence::new(
                Misbehavior::LunaticSignature {
                    conflicting_header: header.clone(),
                    signature: signature.clone(),
                    common_height: evidence.common_height,
                },
                validator.clone(),
                evidence.chain.clone(),
            ))
        })
        .collect()
}

/// Equivocation: every validator that signed both the canonical and the
/// conflicting block in the same round.
///
/// The validator record comes from the conflicting block's own set, which
/// matches the canonical set whenever the header passed the validity check.
pub fn equivocation_culprits(
    evidence: &LightClientAttackEvidence,
    view: &CanonicalView,
) -> Vec<InternalEvidence> {
    let conflicting = evidence.conflicting_block.commit();
    let canonical = &view.reference_commit;
    let validators = &evidence.conflicting_block.validator_set;

    canonical
        .signers()
        .intersection(&conflicting.signers())
        .filter_map(|address| {
            let Some(validator) = validators.get(address) else {
                debug!(
                    validator = %hex::encode(address),
                    "Double signer missing from validator set, skipping"
                );
                return None;
            };
            Some(InternalEvidence::new(
                Misbehavior::DuplicateVote {
                    height: canonical.height,
                    round: canonical.round,
                    canonical_block_id: canonical.block_id,
                    canonical_signature: canonical.signature_of(address)?.clone(),
                    conflicting_block_id: conflicting.block_id,
                    conflicting_signature: conflicting.signature_of(address)?.clone(),
                },
                validator.clone(),
                evidence.chain.clone(),
            ))
        })
        .collect()
}
