//! # Value Objects
//!
//! Transport-level identifiers and the packet/acknowledgment envelope.

use serde::{Deserialize, Serialize};
use shared_types::ChainId;
use std::fmt;

/// Default port the parent chain registers for evidence packets.
pub const EVIDENCE_PORT: &str = "evidence";

/// Inter-chain messaging port identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortId(pub String);

impl PortId {
    /// Create a port id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The evidence port.
    pub fn evidence() -> Self {
        Self::new(EVIDENCE_PORT)
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::evidence()
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Application packet as handed to the inter-chain messaging channel.
///
/// Ordering, retries and timeouts below this layer belong to the transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    /// Per-sender monotonically increasing sequence.
    pub sequence: u64,
    /// Chain that sent the packet.
    pub source_chain: ChainId,
    /// Chain the packet is addressed to.
    pub destination_chain: ChainId,
    /// Port on the destination chain.
    pub destination_port: PortId,
    /// JSON-encoded packet data.
    pub data: Vec<u8>,
}

/// Receiver's answer to a packet.
///
/// JSON encoded as `{"result": [...]}` or `{"error": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acknowledgment {
    /// Packet accepted.
    Result(Vec<u8>),
    /// Packet rejected.
    Error(String),
}

impl Acknowledgment {
    /// Default success marker.
    pub fn success() -> Self {
        Self::Result(vec![0x01])
    }

    /// Negative acknowledgment.
    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error(reason.into())
    }

    /// Whether the packet was accepted.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Result(_))
    }

    /// Wire encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        // Serializing a two-variant enum of bytes/string cannot fail.
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Parse a wire acknowledgment.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
