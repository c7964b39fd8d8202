//! # Algorithms Module
//!
//! Packet data codec.

pub mod codec;

pub use codec::{decode_packet, encode_committed_evidence, packet_type};
