//! Static Port Router Adapter

use crate::domain::{PortId, RelayError};
use crate::ports::PortRouter;
use shared_types::ChainId;
use std::collections::HashMap;

/// Fixed chain-to-port routing table.
#[derive(Clone, Debug, Default)]
pub struct StaticPortRouter {
    routes: HashMap<ChainId, PortId>,
}

impl StaticPortRouter {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `port` for `chain`.
    pub fn with_route(mut self, chain: ChainId, port: PortId) -> Self {
        self.routes.insert(chain, port);
        self
    }
}

impl PortRouter for StaticPortRouter {
    fn get_port(&self, chain: &ChainId) -> Result<PortId, RelayError> {
        self.routes
            .get(chain)
            .cloned()
            .ok_or_else(|| RelayError::UnknownPort(chain.clone()))
    }
}
