//! Checkpoint enforcement at the node boundary.
//!
//! [`ChainGuard`] is what the block-acceptance and chain-selection paths
//! talk to. It turns a failed checkpoint check into an error the caller must
//! propagate, keeps rejected blocks out of the index, and uses the resolved
//! checkpoint anchor as the floor for reorganizations.

use std::sync::Arc;

use tracing::{debug, info, warn};

use keel_checkpoints::Checkpoints;
use keel_core::types::Hash256;

use crate::block_index::{BlockIndexEntry, MemoryBlockIndex};
use crate::error::NodeError;

#[derive(Debug, Clone)]
pub struct ChainGuard {
    checkpoints: Checkpoints,
    index: Arc<MemoryBlockIndex>,
}

impl ChainGuard {
    pub fn new(checkpoints: Checkpoints, index: Arc<MemoryBlockIndex>) -> Self {
        Self { checkpoints, index }
    }

    pub fn checkpoints(&self) -> &Checkpoints {
        &self.checkpoints
    }

    pub fn index(&self) -> &Arc<MemoryBlockIndex> {
        &self.index
    }

    /// Accept a block into the index after the checkpoint check.
    ///
    /// # Errors
    ///
    /// - [`NodeError::Checkpoint`] if `hash` contradicts the checkpoint at
    ///   `height`; the index is left untouched
    /// - [`NodeError::DuplicateBlock`] if `hash` is already indexed
    pub fn accept_block(
        &self,
        height: u64,
        hash: Hash256,
        prev_hash: Hash256,
    ) -> Result<(), NodeError> {
        self.checkpoints.verify_block(height, &hash)?;

        let entry = BlockIndexEntry {
            hash,
            height,
            prev_hash,
        };
        if !self.index.insert(entry) {
            return Err(NodeError::DuplicateBlock(hash));
        }
        if self.checkpoints.table().contains_height(height) {
            info!(height, %hash, "indexed checkpoint block");
        } else {
            debug!(height, %hash, "indexed block");
        }
        Ok(())
    }

    /// Most recent checkpoint block present in the index.
    ///
    /// Holds the index read lock only for the scan.
    pub fn last_checkpoint(&self) -> Option<BlockIndexEntry> {
        let snapshot = self.index.read();
        self.checkpoints.last_checkpoint(&*snapshot).cloned()
    }

    /// Refuse a reorganization that would disconnect the checkpoint anchor.
    ///
    /// `fork_height` is the height of the last block shared by the current
    /// chain and the candidate branch. Everything above it is disconnected,
    /// so the fork point must not lie below the anchor. With no anchor
    /// indexed yet, every reorg is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::ReorgBelowCheckpoint`] when `fork_height` is
    /// strictly below the anchor's height.
    pub fn check_reorg(&self, fork_height: u64) -> Result<(), NodeError> {
        let Some(anchor) = self.last_checkpoint() else {
            return Ok(());
        };
        if fork_height < anchor.height {
            warn!(
                fork_height,
                checkpoint_height = anchor.height,
                checkpoint_hash = %anchor.hash,
                "rejecting reorg below checkpoint"
            );
            return Err(NodeError::ReorgBelowCheckpoint {
                fork_height,
                checkpoint_height: anchor.height,
            });
        }
        Ok(())
    }

    /// Fraction of the checkpointed chain covered by `tip_height`, in `[0, 1]`.
    ///
    /// Reports 1.0 when there is nothing to measure against (testnet, or a
    /// tip already past the last checkpoint). Display only.
    pub fn sync_progress(&self, tip_height: u64) -> f64 {
        let estimate = self.checkpoints.total_blocks_estimate();
        if estimate == 0 {
            return 1.0;
        }
        (tip_height as f64 / estimate as f64).min(1.0)
    }
}
