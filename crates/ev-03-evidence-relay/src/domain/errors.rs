//! # Domain Errors
//!
//! Error types for the Cross-Chain Evidence Relay.

use shared_types::ChainId;
use thiserror::Error;

/// Relay error types.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Packet data could not be encoded.
    #[error("Packet encoding failed: {0}")]
    Encode(String),

    /// Packet data could not be decoded.
    #[error("Packet decoding failed: {0}")]
    Decode(String),

    /// Packet data carries no type tag.
    #[error("Packet data has no type")]
    MissingPacketType,

    /// Packet data is of a type this relay does not handle.
    #[error("Unexpected packet type: {0}")]
    UnexpectedPacketType(String),

    /// No port is registered for the chain.
    #[error("No port registered for chain {0}")]
    UnknownPort(ChainId),

    /// Evidence belongs to a chain this relay does not send for.
    #[error("Evidence for chain {found}, relay sends for {expected}")]
    ForeignEvidence {
        /// Chain this relay sends for
        expected: ChainId,
        /// Chain of the evidence
        found: ChainId,
    },

    /// Nothing to relay.
    #[error("Empty evidence batch")]
    EmptyBatch,

    /// Not enough parent-chain nodes to reach a correct one.
    #[error("Only {available} parent nodes available, {required} required")]
    InsufficientSample {
        /// Nodes the directory supplied
        available: usize,
        /// Minimum sample size
        required: usize,
    },

    /// The transport refused the send.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
