//! End-to-end checkpoint scenarios against a small table and the release
//! table, on both networks.

use std::collections::{BTreeMap, HashMap};

use keel_checkpoints::{CheckpointTable, Checkpoints};
use keel_core::constants::{MAINNET_CHECKPOINTS, NetworkType};
use keel_core::types::Hash256;
use keel_tests::helpers::*;

// ------------------------------------------------------------------
// Scenario table {(0,A), (25,B), (125,C)}
// ------------------------------------------------------------------

#[test]
fn check_block_scenario() {
    let cps = scenario_checkpoints(NetworkType::Mainnet);
    assert!(cps.check_block(25, &scenario_b()));
    assert!(!cps.check_block(25, &block_hash("attacker", 25)));
    assert!(cps.check_block(26, &block_hash("anything", 26)));
    assert!(cps.check_block(0, &scenario_a()));
    assert!(!cps.check_block(0, &scenario_c()));
}

#[test]
fn estimate_scenario() {
    assert_eq!(
        scenario_checkpoints(NetworkType::Mainnet).total_blocks_estimate(),
        125
    );
}

#[test]
fn last_checkpoint_prefers_highest_match() {
    let cps = scenario_checkpoints(NetworkType::Mainnet);
    let index: HashMap<Hash256, &str> =
        [(scenario_a(), "refA"), (scenario_c(), "refC")].into_iter().collect();
    assert_eq!(cps.last_checkpoint(&index), Some(&"refC"));
}

#[test]
fn last_checkpoint_on_empty_index_is_none() {
    let cps = scenario_checkpoints(NetworkType::Mainnet);
    let index: BTreeMap<Hash256, u64> = BTreeMap::new();
    assert_eq!(cps.last_checkpoint(&index), None);
}

#[test]
fn testnet_reports_no_checkpoints() {
    let cps = scenario_checkpoints(NetworkType::Testnet);
    assert!(cps.check_block(25, &block_hash("attacker", 25)));
    assert_eq!(cps.total_blocks_estimate(), 0);

    let index: HashMap<Hash256, u64> = [(scenario_a(), 0), (scenario_b(), 25), (scenario_c(), 125)]
        .into_iter()
        .collect();
    assert_eq!(cps.last_checkpoint(&index), None);
}

#[test]
fn mainnet_and_testnet_side_by_side() {
    // Same table, two policies, no shared state between them.
    let main = scenario_checkpoints(NetworkType::Mainnet);
    let test = scenario_checkpoints(NetworkType::Testnet);
    let forged = block_hash("attacker", 125);
    assert!(!main.check_block(125, &forged));
    assert!(test.check_block(125, &forged));
    assert!(!main.check_block(125, &forged));
}

// ------------------------------------------------------------------
// Release table
// ------------------------------------------------------------------

#[test]
fn release_table_accepts_its_own_hashes() {
    let cps = Checkpoints::for_network(NetworkType::Mainnet);
    for cp in MAINNET_CHECKPOINTS {
        assert!(cps.check_block(cp.height, &cp.hash), "checkpoint {cp} rejected");
        assert!(
            !cps.check_block(cp.height, &Hash256::ZERO),
            "zero hash accepted at {}",
            cp.height
        );
    }
}

#[test]
fn release_table_estimate() {
    assert_eq!(
        Checkpoints::for_network(NetworkType::Mainnet).total_blocks_estimate(),
        140_000
    );
    assert_eq!(
        Checkpoints::for_network(NetworkType::Testnet).total_blocks_estimate(),
        0
    );
}

#[test]
fn release_table_partial_sync_anchor() {
    // A node that has indexed everything up to height 50_025.
    let cps = Checkpoints::for_network(NetworkType::Mainnet);
    let index: HashMap<Hash256, u64> = MAINNET_CHECKPOINTS
        .iter()
        .filter(|cp| cp.height <= 50_025)
        .map(|cp| (cp.hash, cp.height))
        .collect();
    assert_eq!(cps.last_checkpoint(&index), Some(&50_025));
}

#[test]
fn testnet_table_is_empty() {
    let cps = Checkpoints::for_network(NetworkType::Testnet);
    assert!(cps.table().is_empty());
    assert_eq!(cps.table(), &CheckpointTable::empty());
}
