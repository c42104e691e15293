//! Shared test helpers for integration tests.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use keel_checkpoints::{CheckpointTable, Checkpoints};
use keel_core::constants::NetworkType;
use keel_core::types::{Checkpoint, Hash256};
use keel_node_lib::{BlockIndexEntry, ChainGuard, MemoryBlockIndex};

/// Hash for the block at `height` on a named branch.
///
/// SHA-256 over `branch || height`, so every (branch, height) pair maps to a
/// distinct, stable hash.
pub fn block_hash(branch: &str, height: u64) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update(branch.as_bytes());
    hasher.update(height.to_le_bytes());
    Hash256(hasher.finalize().into())
}

/// The three-entry scenario table `{(0, A), (25, B), (125, C)}`.
pub fn scenario_table() -> CheckpointTable {
    CheckpointTable::new([
        Checkpoint::new(0, scenario_a()),
        Checkpoint::new(25, scenario_b()),
        Checkpoint::new(125, scenario_c()),
    ])
    .expect("scenario table is ordered")
}

pub fn scenario_a() -> Hash256 {
    block_hash("main", 0)
}

pub fn scenario_b() -> Hash256 {
    block_hash("main", 25)
}

pub fn scenario_c() -> Hash256 {
    block_hash("main", 125)
}

/// Checkpoint policy over [`scenario_table`].
pub fn scenario_checkpoints(network: NetworkType) -> Checkpoints {
    Checkpoints::new(Arc::new(scenario_table()), network)
}

/// A node guard over [`scenario_table`] with an empty index.
pub fn scenario_guard(network: NetworkType) -> ChainGuard {
    ChainGuard::new(
        scenario_checkpoints(network),
        Arc::new(MemoryBlockIndex::new()),
    )
}

/// Index entries for heights `from..=to` on `branch`, chained by `prev_hash`.
///
/// The block at `from` points at `parent`.
pub fn branch(branch_name: &str, parent: Hash256, from: u64, to: u64) -> Vec<BlockIndexEntry> {
    let mut prev = parent;
    (from..=to)
        .map(|height| {
            let hash = block_hash(branch_name, height);
            let entry = BlockIndexEntry {
                hash,
                height,
                prev_hash: prev,
            };
            prev = hash;
            entry
        })
        .collect()
}
