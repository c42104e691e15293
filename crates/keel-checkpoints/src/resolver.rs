//! Locates the most recent checkpoint present in the node's block index.

use keel_core::constants::NetworkType;
use keel_core::traits::BlockIndex;

use crate::table::CheckpointTable;

/// Return the index entry for the highest checkpoint whose hash the node
/// already knows, or `None` if it knows none of them.
///
/// Scans the table from the highest height down and stops at the first hash
/// found in `index`. A synced node hits on the first lookup; a partially
/// synced one falls back to an older anchor. The match is by hash only: an
/// indexed side-branch block counts the same as a main-chain one.
///
/// Always `None` on networks without checkpoints. The index is only read,
/// and only for the duration of the call.
pub fn last_checkpoint<'a, I>(
    table: &CheckpointTable,
    network: NetworkType,
    index: &'a I,
) -> Option<&'a I::Entry>
where
    I: BlockIndex + ?Sized,
{
    if !network.enforces_checkpoints() {
        return None;
    }
    table.iter_rev().find_map(move |cp| index.get_block(&cp.hash))
}
