use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use vyscan::commands::{
    classify_command, init_workspace_command, list_flagged_command, list_networks_command,
    scan_command, workspace_info_command,
};
use vyscan::init_tracing;
use vyscan_core::model::Network;

/// Triage scanner for Vyper contracts exposed to the raw_call reentrancy bug.
///
/// This CLI is a thin wrapper around `vyscan-core` (exposed in code as `vyscan_core`).
/// All substantive logic lives in the library so it can be tested without a network.
#[derive(Parser, Debug)]
#[command(
    name = "vyscan",
    version,
    about = "Flag verified Vyper contracts that may hit the raw_call reentrancy bug",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a scan workspace at the given root.
    ///
    /// This will:
    /// - Create a `.vyscan` metadata directory with `config.json`.
    /// - Create `etherscan-export`, `contracts`, and `reports` directories.
    Init {
        /// Workspace root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Optional workspace name. If omitted, the name is derived from the root directory.
        #[arg(long)]
        name: Option<String>,

        /// Overwrite an existing config file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Show config, directories, and per-network state of a workspace.
    Info {
        /// Workspace root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Use this config file (JSON or YAML) instead of `.vyscan/config.json`.
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List supported networks, explorer endpoints, and API key variables.
    Networks {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Classify local source files without fetching or caching anything.
    Classify {
        /// Source files to classify.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Walk the export lists, fetch or re-check sources, and update the cache.
    ///
    /// API keys are read from one environment variable per network
    /// (e.g. `ETHERSCAN_API_KEY=key1,key2`); see `vyscan networks`.
    Scan {
        /// Workspace root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Use this config file (JSON or YAML) instead of `.vyscan/config.json`.
        #[arg(long)]
        config: Option<String>,

        /// Only scan this network (repeatable). Defaults to the config's list.
        #[arg(long = "network", value_name = "NETWORK")]
        networks: Vec<Network>,

        /// Emit the summary as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List cached (possibly vulnerable) contract sources.
    Flagged {
        /// Workspace root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Use this config file (JSON or YAML) instead of `.vyscan/config.json`.
        #[arg(long)]
        config: Option<String>,

        /// Only list this network (repeatable).
        #[arg(long = "network", value_name = "NETWORK")]
        networks: Vec<Network>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Init { root, name, force } => init_workspace_command(&root, name, force)?,
        Command::Info { root, config, json } => {
            workspace_info_command(&root, config.as_deref(), json)?
        }
        Command::Networks { json } => list_networks_command(json)?,
        Command::Classify { paths, json } => classify_command(&paths, json)?,
        Command::Scan { root, config, networks, json } => {
            scan_command(&root, config.as_deref(), &networks, json)?
        }
        Command::Flagged { root, config, networks, json } => {
            list_flagged_command(&root, config.as_deref(), &networks, json)?
        }
    }

    Ok(())
}
