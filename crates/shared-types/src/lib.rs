//! # Shared Types Crate
//!
//! Evidence data model shared by every subsystem of the evidence pipeline:
//! chain primitives, validator-set snapshots, headers and commits, the raw
//! light-client accusation and the attributed per-validator evidence.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Chain-Scoped**: Every evidence record names the chain it pertains to.
//! - **Snapshot Identity**: Evidence points at validator-set snapshots, never
//!   at live validator state.

pub mod entities;
pub mod errors;
pub mod evidence;
pub mod fault_model;

pub use entities::*;
pub use errors::*;
pub use evidence::*;
pub use fault_model::FaultModel;
