//! Trait interfaces for collaborators owned outside the checkpoint core.
//!
//! - [`BlockIndex`]: hash-keyed view of known block metadata (the node's
//!   block index implements it; plain `HashMap` / `BTreeMap` do too)

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::types::Hash256;

/// Read-only view of the node's block index.
///
/// Maps a block hash to whatever metadata the blockchain subsystem keeps
/// for it. The index covers main-chain and side-branch blocks alike. The
/// checkpoint core only reads it, for the duration of a single call; making
/// the view safe to read (read lock, snapshot) is the caller's job.
pub trait BlockIndex {
    /// Metadata stored per block.
    type Entry;

    /// Look up a block by hash. Returns `None` if the block is unknown.
    fn get_block(&self, hash: &Hash256) -> Option<&Self::Entry>;

    /// Check whether a block is known.
    ///
    /// Default implementation delegates to [`get_block`](Self::get_block).
    fn contains_block(&self, hash: &Hash256) -> bool {
        self.get_block(hash).is_some()
    }
}

impl<T, S: BuildHasher> BlockIndex for HashMap<Hash256, T, S> {
    type Entry = T;

    fn get_block(&self, hash: &Hash256) -> Option<&T> {
        self.get(hash)
    }
}

impl<T> BlockIndex for BTreeMap<Hash256, T> {
    type Entry = T;

    fn get_block(&self, hash: &Hash256) -> Option<&T> {
        self.get(hash)
    }
}
