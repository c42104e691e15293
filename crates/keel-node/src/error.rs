//! Node-level errors.
use thiserror::Error;

use keel_core::error::CheckpointError;
use keel_core::types::Hash256;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error(transparent)] Checkpoint(#[from] CheckpointError),
    #[error("duplicate block: {0}")] DuplicateBlock(Hash256),
    #[error("reorg from height {fork_height} would unwind checkpoint at height {checkpoint_height}")]
    ReorgBelowCheckpoint { fork_height: u64, checkpoint_height: u64 },
    #[error("config: {0}")] Config(#[from] ::config::ConfigError),
}
