//! # keel-core
//! Foundation types, compiled-in constants, and collaborator traits for the
//! Keel checkpoint safeguard.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
