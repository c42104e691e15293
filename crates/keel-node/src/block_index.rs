//! In-memory block index.
//!
//! Maps block hash to [`BlockIndexEntry`] for every block the node has seen,
//! main chain and side branches alike. Writers take the lock briefly to
//! insert; readers take a [`read`](MemoryBlockIndex::read) snapshot, which
//! implements [`BlockIndex`](keel_core::traits::BlockIndex) through the
//! underlying `HashMap`.

use std::collections::HashMap;

use parking_lot::{RwLock, RwLockReadGuard};
use serde::{Deserialize, Serialize};

use keel_core::types::Hash256;

use crate::error::NodeError;

/// Metadata the node keeps per indexed block.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BlockIndexEntry {
    /// Block header hash.
    pub hash: Hash256,
    /// Height of the block.
    pub height: u64,
    /// Hash of the parent block. Zero for genesis.
    pub prev_hash: Hash256,
}

/// Thread-safe hash → entry map.
#[derive(Debug, Default)]
pub struct MemoryBlockIndex {
    blocks: RwLock<HashMap<Hash256, BlockIndexEntry>>,
}

impl MemoryBlockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Returns `false` (and leaves the index unchanged) if
    /// the hash is already indexed.
    pub fn insert(&self, entry: BlockIndexEntry) -> bool {
        let mut blocks = self.blocks.write();
        if blocks.contains_key(&entry.hash) {
            return false;
        }
        blocks.insert(entry.hash, entry);
        true
    }

    /// Clone an entry out of the index.
    pub fn get(&self, hash: &Hash256) -> Option<BlockIndexEntry> {
        self.blocks.read().get(hash).cloned()
    }

    pub fn contains(&self, hash: &Hash256) -> bool {
        self.blocks.read().contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.blocks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.read().is_empty()
    }

    /// Read snapshot. Writers block until the guard is dropped, so keep it
    /// short-lived.
    pub fn read(&self) -> RwLockReadGuard<'_, HashMap<Hash256, BlockIndexEntry>> {
        self.blocks.read()
    }

    /// Build an index from `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::DuplicateBlock`] for the first hash that appears
    /// twice.
    pub fn try_from_entries<I>(entries: I) -> Result<Self, NodeError>
    where
        I: IntoIterator<Item = BlockIndexEntry>,
    {
        let index = Self::new();
        for entry in entries {
            let hash = entry.hash;
            if !index.insert(entry) {
                return Err(NodeError::DuplicateBlock(hash));
            }
        }
        Ok(index)
    }
}
