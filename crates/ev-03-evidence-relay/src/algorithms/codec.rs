//! # Packet Codec
//!
//! JSON encoding of relay packet data. The `"type"` tag is inspected
//! before the body so a foreign packet type is reported as such rather
//! than as a decode failure.

use crate::domain::{
    CommittedEvidencePacket, Packet, RelayError, RelayPacketData, COMMITTED_EVIDENCE_TYPE,
};
use serde_json::Value;

/// Encode committed evidence as packet data.
pub fn encode_committed_evidence(packet: CommittedEvidencePacket) -> Result<Vec<u8>, RelayError> {
    serde_json::to_vec(&RelayPacketData::CommittedEvidence(packet))
        .map_err(|e| RelayError::Encode(e.to_string()))
}

/// Read the `"type"` tag of packet data.
pub fn packet_type(data: &[u8]) -> Result<String, RelayError> {
    let value: Value = serde_json::from_slice(data)?;
    value
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(RelayError::MissingPacketType)
}

/// Decode a packet expected to carry committed evidence.
pub fn decode_packet(packet: &Packet) -> Result<CommittedEvidencePacket, RelayError> {
    let found = packet_type(&packet.data)?;
    if found != COMMITTED_EVIDENCE_TYPE {
        return Err(RelayError::UnexpectedPacketType(found));
    }
    match serde_json::from_slice::<RelayPacketData>(&packet.data)? {
        RelayPacketData::CommittedEvidence(inner) => Ok(inner),
    }
}
