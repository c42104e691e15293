//! Integration test suite for the Keel checkpoint safeguard.
//!
//! Exercises the checkpoint table, enforcement, sync estimate and anchor
//! resolution together, on both networks, and through the node guard.
pub mod helpers;
