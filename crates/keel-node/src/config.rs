//! Node configuration.
//!
//! [`NodeConfig`] is layered: built-in defaults, then an optional TOML file,
//! then `KEEL_*` environment variables (`KEEL_NETWORK_TYPE=testnet`,
//! `KEEL_LOG_LEVEL=debug`, ...). Command-line flags are applied on top by
//! the binary.

use std::fmt;
use std::path::Path;

use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use keel_core::constants::NetworkType;

use crate::error::NodeError;

/// Prefix for environment-variable overrides.
pub const ENV_PREFIX: &str = "KEEL";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Configuration for a node instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Network the node runs on. Checkpoints are enforced on mainnet only.
    pub network_type: NetworkType,
    /// Log level filter string (e.g. "info", "debug", "keel_checkpoints=trace").
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::for_network(NetworkType::default())
    }
}

impl NodeConfig {
    /// Defaults for `network_type`.
    pub fn for_network(network_type: NetworkType) -> Self {
        Self {
            network_type,
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }

    /// Load defaults, then `path` (if given), then `KEEL_*` variables.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::Config`] if the file is missing or malformed, or a
    /// value has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, NodeError> {
        Self::load_from(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Like [`load`](Self::load) but with an explicit environment source.
    pub fn load_from(path: Option<&Path>, env: Environment) -> Result<Self, NodeError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        let cfg: Self = builder.add_source(env).build()?.try_deserialize()?;
        Ok(cfg)
    }
}
