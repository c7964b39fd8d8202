//! # Attack Kind
//!
//! Decision between the three light-client attack shapes.

use shared_types::{AttackKind, Round};

/// Decide which attack produced a conflicting block.
///
/// Checked in order:
/// 1. The conflicting header breaks the light-client validity rule
///    against the canonical one: **lunatic**.
/// 2. Both commits were made in the same round: **equivocation**.
/// 3. Otherwise: **amnesia**.
pub fn determine_attack_kind(
    violates_validity: bool,
    canonical_round: Round,
    conflicting_round: Round,
) -> AttackKind {
    if violates_validity {
        AttackKind::Lunatic
    } else if canonical_round == conflicting_round {
        AttackKind::Equivocation
    } else {
        AttackKind::Amnesia
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_invalid_header_is_lunatic_regardless_of_round() {
        assert_eq!(determine_attack_kind(true, 2, 2), AttackKind::Lunatic);
        assert_eq!(determine_attack_kind(true, 1, 3), AttackKind::Lunatic);
    }

    #[test]
    fn test_same_round_is_equivocation() {
        assert_eq!(determine_attack_kind(false, 2, 2), AttackKind::Equivocation);
    }

    #[test]
    fn test_different_round_is_amnesia() {
        assert_eq!(determine_attack_kind(false, 0, 1), AttackKind::Amnesia);
    }

    proptest! {
        #[test]
        fn prop_branches_partition_inputs(
            invalid in any::<bool>(),
            canonical in 0u32..16,
            conflicting in 0u32..16,
        ) {
            let kind = determine_attack_kind(invalid, canonical, conflicting);
            prop_assert_eq!(kind == AttackKind::Lunatic, invalid);
            prop_assert_eq!(
                kind == AttackKind::Equivocation,
                !invalid && canonical == conflicting
            );
            prop_assert_eq!(
                kind == AttackKind::Amnesia,
                !invalid && canonical != conflicting
            );
        }
    }
}
