//! Adversarial tests: long-range rewrites against the node guard.
//!
//! Each test builds an honest chain through the guard and then has an
//! attacker branch try to displace it.

use keel_core::constants::NetworkType;
use keel_core::error::CheckpointError;
use keel_core::types::Hash256;
use keel_node_lib::NodeError;
use keel_tests::helpers::*;

/// Feed the honest chain `0..=tip` through the guard. Heights 0, 25 and 125
/// land on the scenario checkpoints.
fn honest_chain(guard: &keel_node_lib::ChainGuard, tip: u64) {
    let mut prev = Hash256::ZERO;
    for entry in branch("main", Hash256::ZERO, 0, tip) {
        assert_eq!(entry.prev_hash, prev);
        guard
            .accept_block(entry.height, entry.hash, entry.prev_hash)
            .unwrap_or_else(|e| panic!("honest block {} rejected: {e}", entry.height));
        prev = entry.hash;
    }
}

// ---------------------------------------------------------------------------
// Attack: rewrite history from genesis with a heavier private chain.
// The attacker's block at height 25 cannot carry the checkpointed hash.
// ---------------------------------------------------------------------------

#[test]
fn attacker_branch_stops_at_first_checkpoint() {
    let guard = scenario_guard(NetworkType::Mainnet);
    honest_chain(&guard, 30);

    let attack = branch("attacker", scenario_a(), 1, 30);
    for entry in &attack {
        let res = guard.accept_block(entry.height, entry.hash, entry.prev_hash);
        if entry.height == 25 {
            assert!(matches!(
                res,
                Err(NodeError::Checkpoint(CheckpointError::Mismatch { height: 25, .. }))
            ));
            break;
        }
        res.unwrap();
    }

    assert!(!guard.index().contains(&block_hash("attacker", 25)));
    assert_eq!(guard.last_checkpoint().map(|e| e.hash), Some(scenario_b()));
}

// ---------------------------------------------------------------------------
// Attack: reorg onto a side branch forked below the anchor.
// ---------------------------------------------------------------------------

#[test]
fn deep_reorg_below_anchor_is_refused() {
    let guard = scenario_guard(NetworkType::Mainnet);
    honest_chain(&guard, 130);
    assert_eq!(guard.last_checkpoint().map(|e| e.height), Some(125));

    // Forks at height 100: would disconnect the checkpoint at 125.
    let err = guard.check_reorg(100).unwrap_err();
    assert!(matches!(
        err,
        NodeError::ReorgBelowCheckpoint {
            fork_height: 100,
            checkpoint_height: 125
        }
    ));

    // Shallow reorgs above the anchor are allowed.
    guard.check_reorg(125).unwrap();
    guard.check_reorg(128).unwrap();
}

#[test]
fn partially_synced_node_anchors_on_older_checkpoint() {
    let guard = scenario_guard(NetworkType::Mainnet);
    honest_chain(&guard, 60);

    assert_eq!(guard.last_checkpoint().map(|e| e.height), Some(25));
    guard.check_reorg(30).unwrap();
    assert!(guard.check_reorg(10).is_err());
    assert!((guard.sync_progress(60) - 60.0 / 125.0).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Testnet: no checkpoints, so the same attack is accepted at every height.
// ---------------------------------------------------------------------------

#[test]
fn testnet_accepts_attacker_branch() {
    let guard = scenario_guard(NetworkType::Testnet);
    honest_chain(&guard, 30);

    for entry in branch("attacker", scenario_a(), 1, 30) {
        guard
            .accept_block(entry.height, entry.hash, entry.prev_hash)
            .unwrap();
    }
    assert_eq!(guard.last_checkpoint(), None);
    guard.check_reorg(0).unwrap();
}

// ---------------------------------------------------------------------------
// The anchor is matched by hash alone. A checkpoint block indexed under a
// side-branch parent still counts; main-chain membership is not checked.
// ---------------------------------------------------------------------------

#[test]
fn anchor_match_ignores_chain_membership() {
    let guard = scenario_guard(NetworkType::Mainnet);
    guard
        .accept_block(125, scenario_c(), block_hash("orphan-parent", 124))
        .unwrap();

    let anchor = guard.last_checkpoint().unwrap();
    assert_eq!(anchor.hash, scenario_c());
    assert_eq!(anchor.prev_hash, block_hash("orphan-parent", 124));
}
