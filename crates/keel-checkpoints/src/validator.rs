//! Checkpoint enforcement for candidate blocks.
//!
//! The node layer calls [`check_block`] (or [`verify_block`], which returns a
//! typed error) while accepting a block whose height is known. A failing
//! check means the block, and every block extending it, must stay out of the
//! canonical chain regardless of its proof-of-work or transactions.

use keel_core::constants::NetworkType;
use keel_core::error::CheckpointError;
use keel_core::types::Hash256;
use tracing::{debug, warn};

use crate::table::CheckpointTable;

/// Verify that a block at `height` has the checkpointed hash.
///
/// Returns `true` when:
/// - `network` does not enforce checkpoints (testnet), or
/// - `height` carries no checkpoint, or
/// - `hash` equals the checkpointed hash.
///
/// Returns `false` only for a hash mismatch at a checkpointed height on
/// mainnet. Pure apart from logging.
pub fn check_block(
    table: &CheckpointTable,
    network: NetworkType,
    height: u64,
    hash: &Hash256,
) -> bool {
    verify_block(table, network, height, hash).is_ok()
}

/// Like [`check_block`] but reports a mismatch as an error.
///
/// # Errors
///
/// Returns [`CheckpointError::Mismatch`] when the hash does not match the
/// checkpoint at the given height.
pub fn verify_block(
    table: &CheckpointTable,
    network: NetworkType,
    height: u64,
    hash: &Hash256,
) -> Result<(), CheckpointError> {
    if !network.enforces_checkpoints() {
        return Ok(());
    }
    let Some(expected) = table.get(height) else {
        return Ok(());
    };
    if expected == hash {
        debug!(height, %hash, "checkpoint passed");
        return Ok(());
    }
    warn!(height, %expected, got = %hash, "checkpoint failed");
    Err(CheckpointError::Mismatch {
        height,
        expected: *expected,
        got: *hash,
    })
}
