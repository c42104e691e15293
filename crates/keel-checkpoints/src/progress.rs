//! Coarse chain-height estimate for initial sync progress.

use keel_core::constants::NetworkType;

use crate::table::CheckpointTable;

/// Height of the highest checkpoint, used as a lower bound on the chain
/// height while syncing.
///
/// Returns 0 on networks without checkpoints. Advisory only; consensus code
/// must not branch on it. An empty table also yields 0, though a release
/// never ships one.
pub fn total_blocks_estimate(table: &CheckpointTable, network: NetworkType) -> u64 {
    if !network.enforces_checkpoints() {
        return 0;
    }
    table.last().map_or(0, |c| c.height)
}
