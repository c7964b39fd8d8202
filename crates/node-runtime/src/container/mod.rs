//! # Subsystem Container
//!
//! Configuration and construction of the in-process evidence pipeline.

pub mod config;
pub mod network;

pub use config::{ConfigError, NodeConfig};
pub use network::{BabyNode, EvidenceNetwork, ParentNode};
