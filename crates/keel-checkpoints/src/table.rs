//! Immutable registry of (height, hash) checkpoints.

use keel_core::constants::{MAINNET_CHECKPOINTS, NetworkType};
use keel_core::error::CheckpointError;
use keel_core::types::{Checkpoint, Hash256};

/// Canonical height → hash assignments, strictly increasing by height.
///
/// Built once at startup and never mutated. Share it behind an `Arc` or a
/// plain reference; there are no methods taking `&mut self`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckpointTable {
    entries: Vec<Checkpoint>,
}

impl CheckpointTable {
    /// Build a table from entries already ordered by height.
    ///
    /// # Errors
    ///
    /// - [`CheckpointError::DuplicateHeight`] if two entries share a height
    /// - [`CheckpointError::UnsortedHeights`] if a height is lower than its predecessor
    pub fn new(entries: impl IntoIterator<Item = Checkpoint>) -> Result<Self, CheckpointError> {
        let entries: Vec<Checkpoint> = entries.into_iter().collect();
        for pair in entries.windows(2) {
            let (previous, next) = (pair[0].height, pair[1].height);
            if next == previous {
                return Err(CheckpointError::DuplicateHeight(next));
            }
            if next < previous {
                return Err(CheckpointError::UnsortedHeights { previous, next });
            }
        }
        Ok(Self { entries })
    }

    /// A table with no checkpoints.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The compiled-in mainnet table.
    ///
    /// Ordering of [`MAINNET_CHECKPOINTS`] is asserted at compile time, so
    /// this cannot fail.
    pub fn mainnet() -> Self {
        Self {
            entries: MAINNET_CHECKPOINTS.to_vec(),
        }
    }

    /// The table that applies on `network`: the compiled-in data on mainnet,
    /// nothing on testnet.
    pub fn for_network(network: NetworkType) -> Self {
        if network.enforces_checkpoints() {
            Self::mainnet()
        } else {
            Self::empty()
        }
    }

    /// Expected hash at exactly `height`, if that height is checkpointed.
    pub fn get(&self, height: u64) -> Option<&Hash256> {
        self.entries
            .binary_search_by_key(&height, |c| c.height)
            .ok()
            .map(|i| &self.entries[i].hash)
    }

    /// Whether `height` carries a checkpoint.
    pub fn contains_height(&self, height: u64) -> bool {
        self.get(height).is_some()
    }

    /// Entries in ascending height order.
    pub fn iter(&self) -> std::slice::Iter<'_, Checkpoint> {
        self.entries.iter()
    }

    /// Entries in descending height order (highest first).
    pub fn iter_rev(&self) -> std::iter::Rev<std::slice::Iter<'_, Checkpoint>> {
        self.entries.iter().rev()
    }

    /// Lowest checkpoint.
    pub fn first(&self) -> Option<&Checkpoint> {
        self.entries.first()
    }

    /// Highest checkpoint.
    pub fn last(&self) -> Option<&Checkpoint> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[Checkpoint] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a CheckpointTable {
    type Item = &'a Checkpoint;
    type IntoIter = std::slice::Iter<'a, Checkpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
