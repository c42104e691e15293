//! keel-cli: Operator tool for the compiled-in block checkpoints.
//!
//! Lists the active checkpoint table, checks a (height, hash) pair against
//! it, prints the sync estimate, and resolves the checkpoint anchor for a
//! block index dumped to JSON.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use keel_checkpoints::Checkpoints;
use keel_core::constants::NetworkType;
use keel_core::types::{Checkpoint, Hash256};
use keel_node_lib::{BlockIndexEntry, ChainGuard, LogFormat, MemoryBlockIndex, NodeConfig};
use tracing::{debug, error, info};

/// Keel checkpoint tool.
#[derive(Parser, Debug)]
#[command(
    name = "keel-cli",
    version,
    about = "Inspect and apply the compiled-in block checkpoints"
)]
struct Cli {
    /// Use the test network, where no checkpoints are enforced.
    /// Shorthand for `--network testnet`.
    #[arg(long, global = true, conflicts_with = "network")]
    testnet: bool,

    /// Network to run on ("mainnet" or "testnet"). Overrides the config file
    /// and `KEEL_NETWORK_TYPE`.
    #[arg(long, global = true)]
    network: Option<NetworkType>,

    /// Configuration file (TOML). `KEEL_*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the active checkpoint table.
    List(ListArgs),
    /// Check a block hash against the checkpoint at its height.
    Check(CheckArgs),
    /// Print the chain-height estimate used for sync progress.
    Estimate,
    /// Resolve the most recent checkpoint present in a block index file.
    Last(LastArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Highest height first.
    #[arg(long)]
    descending: bool,

    /// Emit JSON instead of one `height hash` line per entry.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Block height.
    #[arg(long)]
    height: u64,

    /// Block hash (64 hex digits, optional 0x prefix).
    #[arg(long)]
    hash: Hash256,
}

#[derive(Args, Debug)]
struct LastArgs {
    /// JSON array of `{"hash", "height", "prev_hash"}` block index entries.
    #[arg(long)]
    index: PathBuf,
}

impl Cli {
    /// Merge the loaded config with command-line overrides.
    fn resolve_config(&self) -> Result<NodeConfig> {
        let config = NodeConfig::load(self.config.as_deref())
            .context("Failed to load configuration")?;
        Ok(self.apply_overrides(config))
    }

    /// Apply command-line flags on top of `config`.
    fn apply_overrides(&self, mut config: NodeConfig) -> NodeConfig {
        if self.testnet {
            config.network_type = NetworkType::Testnet;
        } else if let Some(network) = self.network {
            config.network_type = network;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format.into();
        }
        config
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    };

    init_logging(&config.log_level, config.log_format);
    debug!(?config, "configuration loaded");

    let checkpoints = Checkpoints::for_network(config.network_type);
    info!(
        network = %config.network_type,
        checkpoints = checkpoints.table().len(),
        "checkpoint policy ready"
    );

    match run(cli.command, &checkpoints) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("{e:#}");
            process::exit(2);
        }
    }
}

/// Execute a subcommand. `Ok(false)` means the command ran but the answer
/// was negative (a checkpoint mismatch).
fn run(command: Commands, checkpoints: &Checkpoints) -> Result<bool> {
    match command {
        Commands::List(args) => list(args, checkpoints).map(|()| true),
        Commands::Check(args) => Ok(check(args, checkpoints)),
        Commands::Estimate => {
            println!("{}", checkpoints.total_blocks_estimate());
            Ok(true)
        }
        Commands::Last(args) => last(args, checkpoints).map(|()| true),
    }
}

/// Print the active table.
fn list(args: ListArgs, checkpoints: &Checkpoints) -> Result<()> {
    let table = checkpoints.table();
    let entries: Vec<Checkpoint> = if args.descending {
        table.iter_rev().copied().collect()
    } else {
        table.iter().copied().collect()
    };

    if args.json {
        let out = serde_json::to_string_pretty(&entries).context("Failed to encode table")?;
        println!("{out}");
    } else {
        for cp in &entries {
            println!("{:>10} {}", cp.height, cp.hash);
        }
    }
    Ok(())
}

/// Check one (height, hash) pair.
fn check(args: CheckArgs, checkpoints: &Checkpoints) -> bool {
    match checkpoints.verify_block(args.height, &args.hash) {
        Ok(()) => {
            println!("ok");
            true
        }
        Err(e) => {
            println!("mismatch: {e}");
            false
        }
    }
}

/// Load a block index dump and print the resolved anchor.
fn last(args: LastArgs, checkpoints: &Checkpoints) -> Result<()> {
    let raw = std::fs::read_to_string(&args.index)
        .with_context(|| format!("Failed to read block index: {}", args.index.display()))?;
    let entries: Vec<BlockIndexEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid block index JSON: {}", args.index.display()))?;

    let index = MemoryBlockIndex::try_from_entries(entries)
        .with_context(|| format!("Invalid block index: {}", args.index.display()))?;
    debug!(entries = index.len(), "block index loaded");

    let guard = ChainGuard::new(checkpoints.clone(), Arc::new(index));
    match guard.last_checkpoint() {
        Some(anchor) => {
            let out = serde_json::to_string_pretty(&anchor).context("Failed to encode anchor")?;
            println!("{out}");
        }
        None => println!("none"),
    }
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
/// `RUST_LOG` takes precedence over `level_str` when set.
fn init_logging(level_str: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
