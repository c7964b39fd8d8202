//! # Algorithms Module
//!
//! Pure classification rules: which attack happened and who signed for it.

pub mod attack_kind;
pub mod culprits;

pub use attack_kind::determine_attack_kind;
pub use culprits::{equivocation_culprits, lunatic_culprits};
