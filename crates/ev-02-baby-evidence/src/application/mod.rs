//! # Application Layer
//!
//! Services implementing the inbound ports.

pub mod reporter;
pub mod service;

pub use reporter::LightClientReporter;
pub use service::BabyEvidenceService;
