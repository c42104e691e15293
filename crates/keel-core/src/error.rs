//! Error types for the Keel checkpoint safeguard.
use thiserror::Error;

use crate::types::Hash256;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckpointError {
    #[error("checkpoint mismatch at height {height}: expected {expected}, got {got}")]
    Mismatch { height: u64, expected: Hash256, got: Hash256 },
    #[error("duplicate checkpoint height: {0}")] DuplicateHeight(u64),
    #[error("checkpoint heights out of order: {next} after {previous}")]
    UnsortedHeights { previous: u64, next: u64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashParseError {
    #[error("expected 64 hex digits, got {0}")] InvalidLength(usize),
    #[error("invalid hex: {0}")] InvalidHex(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkParseError {
    #[error("unknown network: {0}")] Unknown(String),
}

#[derive(Error, Debug)]
pub enum KeelError {
    #[error(transparent)] Checkpoint(#[from] CheckpointError),
    #[error(transparent)] HashParse(#[from] HashParseError),
    #[error(transparent)] NetworkParse(#[from] NetworkParseError),
}
