//! # keel-checkpoints: Checkpoint enforcement and anchor resolution.
//!
//! Verifies that blocks at checkpoint heights carry the expected hash,
//! estimates the chain height for sync progress, and locates the most recent
//! checkpoint the node already knows about.
//!
//! # Attack vectors
//!
//! - **Long-range rewrite:** Without checkpoints an attacker with sufficient
//!   hash power could rewrite arbitrarily deep history. Checkpoints pin known-
//!   good blocks so a competing branch that differs at a checkpoint height is
//!   rejected outright, whatever its proof-of-work.
//!
//! - **Checkpoint spoofing:** The checkpoint list is compiled into the binary.
//!   An attacker would need to distribute a modified binary to exploit this,
//!   which is outside our threat model.
//!
//! # Usage
//!
//! Build a [`Checkpoints`] once at startup from a [`CheckpointTable`] and the
//! configured [`NetworkType`](keel_core::constants::NetworkType), then share
//! it. The free functions in [`validator`], [`progress`] and [`resolver`]
//! take the table and network explicitly, which is what tests use to run
//! alternate tables and both networks side by side.

pub mod checkpoints;
pub mod progress;
pub mod resolver;
pub mod table;
pub mod validator;

pub use checkpoints::Checkpoints;
pub use progress::total_blocks_estimate;
pub use resolver::last_checkpoint;
pub use table::CheckpointTable;
pub use validator::{check_block, verify_block};
