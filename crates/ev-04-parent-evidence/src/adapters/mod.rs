//! # Adapters Module

pub mod staking;

pub use staking::InMemoryStakingModule;
