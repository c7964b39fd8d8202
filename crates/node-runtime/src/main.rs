//! # Evidence Node Runtime
//!
//! Runs a baby chain's evidence pipeline together with its parent chain's
//! evidence handler in one process.
//!
//! ## Flow
//!
//! ```text
//! Light client ──→ baby nodes ──classify──→ relay ──gossip──→ parent ──→ staking
//!                                             ↑ packet
//! Baby consensus ──BlockCommitted──→ commit hook
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Install the log subscriber (`RUST_LOG`, default `info`)
//! 2. Load configuration (defaults, then `EV_*` environment overrides)
//! 3. Validate the fault model and node counts
//! 4. Build the subsystems, parent side first
//! 5. Start the block-commit hook and parent block production
//! 6. Run until Ctrl+C

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use node_runtime::{EvidenceNetwork, NodeConfig};

/// The running node.
struct NodeRuntime {
    /// Every subsystem of the pipeline.
    network: EvidenceNetwork,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
}

impl NodeRuntime {
    /// Build the pipeline from `config`.
    fn new(config: NodeConfig) -> Result<Self> {
        let network = EvidenceNetwork::new(config).context("Invalid node configuration")?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Ok(Self {
            network,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Start the event-driven parts of the pipeline.
    fn start(&self) -> JoinHandle<()> {
        info!("===========================================");
        info!("  Evidence Node Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let handle = self.network.spawn_background(self.shutdown_rx.clone());

        info!(
            baby = %self.network.config.baby_chain,
            parent = %self.network.config.parent_chain,
            f = self.network.config.fault_model.f,
            n = self.network.config.fault_model.n,
            parent_block_ms = self.network.config.parent_block_interval.as_millis() as u64,
            "Evidence pipeline running"
        );
        handle
    }

    /// Stop the pipeline and report what was slashed.
    async fn shutdown(&self, handle: JoinHandle<()>) {
        info!("Initiating graceful shutdown...");
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }
        if tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .is_err()
        {
            error!("Background tasks did not stop in time");
        }
        info!(
            slashes = self.network.staking.slashes().len(),
            pending = self.network.staking.pending_count(),
            "Shutdown complete"
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let config = NodeConfig::from_env();
    let runtime = NodeRuntime::new(config)?;
    let handle = runtime.start();

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown(handle).await;
    Ok(())
}
