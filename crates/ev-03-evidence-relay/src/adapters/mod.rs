//! # Adapters Module
//!
//! Routing and directory adapters, the forwarder bridging the baby-chain
//! handler to the relay, and the block-commit hook on the event bus.

pub mod commit_hook;
pub mod directory;
pub mod forwarder;
pub mod routing;

pub use commit_hook::BlockCommitHook;
pub use directory::StaticNodeDirectory;
pub use forwarder::RelayForwarder;
pub use routing::StaticPortRouter;
