//! Trusted Header Adapter
//!
//! Implements `TrustedHeaderStore` over a `ChainHistory`, for light clients
//! that verify against a full node co-located in the same process.

use crate::ports::TrustedHeaderStore;
use ev_01_attack_classifier::ChainHistory;
use shared_types::{Header, Height};
use std::sync::Arc;

/// Trusted headers read from a chain history.
pub struct HistoryTrustedHeaders {
    history: Arc<dyn ChainHistory>,
}

impl HistoryTrustedHeaders {
    /// Wrap `history`.
    pub fn new(history: Arc<dyn ChainHistory>) -> Self {
        Self { history }
    }
}

impl TrustedHeaderStore for HistoryTrustedHeaders {
    fn trusted_header_at(&self, height: Height) -> Option<Header> {
        self.history.header_at(height)
    }
}
