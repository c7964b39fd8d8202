//! # Validity Check Adapter
//!
//! Header validity rule used by the light client.

use crate::ports::HeaderValidityCheck;
use shared_types::Header;

/// Flags a conflicting header whose execution-determined fields differ from
/// the canonical header at the same height.
///
/// Honest validators derive validator sets, consensus parameters, app state
/// and results deterministically from the previous block; only time,
/// proposer and commit data may vary between two honest proposals.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeterministicFieldsCheck;

impl HeaderValidityCheck for DeterministicFieldsCheck {
    fn violates_validity(&self, reference: &Header, conflicting: &Header) -> bool {
        reference.validators_hash != conflicting.validators_hash
            || reference.next_validators_hash != conflicting.next_validators_hash
            || reference.consensus_hash != conflicting.consensus_hash
            || reference.app_hash != conflicting.app_hash
            || reference.last_results_hash != conflicting.last_results_hash
    }
}
