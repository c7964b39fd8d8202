//! # Evidence Pipeline Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── integration/      # Light client to slashing, across every subsystem
//! │   ├── attributed.rs     # Pre-commitment path (scenarios A and B)
//! │   └── committed.rs      # Post-commitment packet path (scenario C)
//! │
//! └── exploits/         # Adversarial inputs at each trust boundary
//!     ├── packets.rs        # Forged, misrouted and replayed packets
//!     └── accusations.rs    # Bogus light-client accusations
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ev-tests
//!
//! # By category
//! cargo test -p ev-tests integration::
//! cargo test -p ev-tests exploits::
//! ```

pub mod exploits;
pub mod harness;
pub mod integration;
