//! # Domain Module
//!
//! Core domain types for the Parent-Chain Evidence Handler.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
