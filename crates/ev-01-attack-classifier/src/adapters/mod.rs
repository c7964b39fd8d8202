//! # Adapters Module
//!
//! Concrete implementations of the classifier's outbound ports.

pub mod amnesia;
pub mod history;
pub mod validity;

pub use amnesia::UnavailableAmnesiaIsolator;
pub use history::InMemoryChainHistory;
pub use validity::DeterministicFieldsCheck;
