//! # Domain Errors
//!
//! Error types for the Parent-Chain Evidence Handler and the staking port.

use ev_03_evidence_relay::{PortId, RelayError};
use shared_types::ChainId;
use thiserror::Error;

/// Staking module errors.
#[derive(Debug, Error)]
pub enum StakingError {
    /// The module cannot take evidence right now.
    #[error("Staking module unavailable: {0}")]
    Unavailable(String),

    /// The module refused the evidence.
    #[error("Evidence rejected by staking module: {0}")]
    Rejected(String),
}

/// Parent-chain evidence handler errors.
#[derive(Debug, Error)]
pub enum ParentEvidenceError {
    /// Nothing submitted.
    #[error("Empty evidence batch")]
    EmptyBatch,

    /// Evidence names a chain that is not a registered child.
    #[error("Chain {0} is not a registered child chain")]
    UnregisteredChain(ChainId),

    /// Packet addressed to another chain.
    #[error("Packet for chain {found}, this is {expected}")]
    WrongDestinationChain {
        /// This chain
        expected: ChainId,
        /// Packet destination
        found: ChainId,
    },

    /// Packet addressed to another port.
    #[error("Packet for port {found}, evidence port is {expected}")]
    WrongPort {
        /// Evidence port
        expected: PortId,
        /// Packet port
        found: PortId,
    },

    /// Packet evidence belongs to a chain other than its sender.
    #[error("Packet from {source_chain} carries evidence of {evidence_chain}")]
    SourceMismatch {
        /// Packet source
        source_chain: ChainId,
        /// Chain named by the evidence
        evidence_chain: ChainId,
    },

    /// Packet could not be decoded.
    #[error(transparent)]
    Packet(#[from] RelayError),

    /// The staking module failed.
    #[error(transparent)]
    Staking(#[from] StakingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_error_is_transparent() {
        let err: ParentEvidenceError = RelayError::UnexpectedPacketType("transfer".into()).into();
        assert_eq!(err.to_string(), "Unexpected packet type: transfer");
    }

    #[test]
    fn test_unregistered_chain_message() {
        let err = ParentEvidenceError::UnregisteredChain(ChainId::new("root/rogue"));
        assert_eq!(
            err.to_string(),
            "Chain root/rogue is not a registered child chain"
        );
    }
}
