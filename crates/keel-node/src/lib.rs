//! # keel-node: Checkpoint policy wired into a node.
//!
//! - [`block_index::MemoryBlockIndex`]: hash-keyed block metadata behind a read/write lock
//! - [`guard::ChainGuard`]: block acceptance, reorg floor, and sync progress
//! - [`config::NodeConfig`]: network selection and logging settings

pub mod block_index;
pub mod config;
pub mod error;
pub mod guard;

pub use block_index::{BlockIndexEntry, MemoryBlockIndex};
pub use self::config::{LogFormat, NodeConfig};
pub use error::NodeError;
pub use guard::ChainGuard;
