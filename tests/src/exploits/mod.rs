//! # Exploit Tests
//!
//! Inputs an attacker controls, fed to the boundary that must reject them.

pub mod accusations;
pub mod packets;
