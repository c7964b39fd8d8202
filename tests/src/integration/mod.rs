//! # Integration Tests
//!
//! Cross-subsystem flows over the in-process evidence network.

pub mod attributed;
pub mod committed;
