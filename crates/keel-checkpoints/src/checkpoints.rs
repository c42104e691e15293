//! Checkpoint policy bound to one table and one network.

use std::sync::Arc;

use keel_core::constants::NetworkType;
use keel_core::error::CheckpointError;
use keel_core::traits::BlockIndex;
use keel_core::types::Hash256;

use crate::table::CheckpointTable;
use crate::{progress, resolver, validator};

/// The checkpoint policy a running node enforces.
///
/// Constructed once during startup and cloned freely afterwards; clones
/// share the same table.
///
/// # Examples
///
/// ```
/// use keel_checkpoints::Checkpoints;
/// use keel_core::constants::NetworkType;
///
/// let testnet = Checkpoints::for_network(NetworkType::Testnet);
/// assert_eq!(testnet.total_blocks_estimate(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Checkpoints {
    table: Arc<CheckpointTable>,
    network: NetworkType,
}

impl Checkpoints {
    pub fn new(table: Arc<CheckpointTable>, network: NetworkType) -> Self {
        Self { table, network }
    }

    /// The release table for `network`.
    pub fn for_network(network: NetworkType) -> Self {
        Self::new(Arc::new(CheckpointTable::for_network(network)), network)
    }

    pub fn table(&self) -> &CheckpointTable {
        &self.table
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// See [`validator::check_block`].
    pub fn check_block(&self, height: u64, hash: &Hash256) -> bool {
        validator::check_block(&self.table, self.network, height, hash)
    }

    /// See [`validator::verify_block`].
    pub fn verify_block(&self, height: u64, hash: &Hash256) -> Result<(), CheckpointError> {
        validator::verify_block(&self.table, self.network, height, hash)
    }

    /// See [`progress::total_blocks_estimate`].
    pub fn total_blocks_estimate(&self) -> u64 {
        progress::total_blocks_estimate(&self.table, self.network)
    }

    /// See [`resolver::last_checkpoint`].
    pub fn last_checkpoint<'a, I>(&self, index: &'a I) -> Option<&'a I::Entry>
    where
        I: BlockIndex + ?Sized,
    {
        resolver::last_checkpoint(&self.table, self.network, index)
    }

    /// Height of the highest enforced checkpoint, or 0 if none are enforced.
    pub fn last_checkpoint_height(&self) -> u64 {
        self.total_blocks_estimate()
    }

    /// Returns `true` if `height` is at or below the highest enforced
    /// checkpoint.
    ///
    /// A block in this zone has a checkpoint at or above it, so any branch
    /// replacing it must still pass through that checkpoint.
    pub fn is_below_checkpoint(&self, height: u64) -> bool {
        if !self.network.enforces_checkpoints() || self.table.is_empty() {
            return false;
        }
        height <= self.last_checkpoint_height()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use keel_core::types::Checkpoint;

    fn policy(network: NetworkType) -> Checkpoints {
        let table = CheckpointTable::new([
            Checkpoint::new(10, Hash256([0xAA; 32])),
            Checkpoint::new(50, Hash256([0xBB; 32])),
        ])
        .unwrap();
        Checkpoints::new(Arc::new(table), network)
    }

    #[test]
    fn facade_delegates() {
        let cps = policy(NetworkType::Mainnet);
        assert!(cps.check_block(10, &Hash256([0xAA; 32])));
        assert!(!cps.check_block(10, &Hash256([0xBB; 32])));
        assert!(cps.verify_block(11, &Hash256::ZERO).is_ok());
        assert_eq!(cps.total_blocks_estimate(), 50);

        let index: HashMap<Hash256, u64> = [(Hash256([0xAA; 32]), 10)].into_iter().collect();
        assert_eq!(cps.last_checkpoint(&index), Some(&10));
    }

    #[test]
    fn is_below_checkpoint_works() {
        let cps = policy(NetworkType::Mainnet);
        assert!(cps.is_below_checkpoint(0));
        assert!(cps.is_below_checkpoint(10));
        assert!(cps.is_below_checkpoint(50));
        assert!(!cps.is_below_checkpoint(51));
        assert!(!cps.is_below_checkpoint(u64::MAX));
    }

    #[test]
    fn testnet_has_no_checkpoint_zone() {
        let cps = policy(NetworkType::Testnet);
        assert_eq!(cps.last_checkpoint_height(), 0);
        assert!(!cps.is_below_checkpoint(0));
        assert!(!cps.is_below_checkpoint(10));
    }

    #[test]
    fn empty_table_has_no_checkpoint_zone() {
        let cps = Checkpoints::new(Arc::new(CheckpointTable::empty()), NetworkType::Mainnet);
        assert!(!cps.is_below_checkpoint(0));
    }

    #[test]
    fn clones_share_table() {
        let cps = Checkpoints::for_network(NetworkType::Mainnet);
        let other = cps.clone();
        assert!(std::ptr::eq(cps.table(), other.table()));
        assert_eq!(other.network(), NetworkType::Mainnet);
    }
}
