use std::path::Path;

use anyhow::Result;
use vyscan_core::model::Network;
use vyscan_core::workspace::{ScanConfig, ScanContext};

use crate::canonicalize_or_current;

/// Load the scan context for `root`, optionally from an explicit config file.
pub fn load_scan_context(root: &str, config: Option<&str>) -> Result<ScanContext> {
    let root_path = canonicalize_or_current(root)?;
    match config {
        Some(config_path) => {
            let config_path = canonicalize_or_current(config_path)?;
            ScanContext::from_config_file(&root_path, &config_path)
        }
        None => ScanContext::from_root(&root_path),
    }
}

/// Networks to work on: the explicit `--network` flags if any, otherwise the config's list.
pub fn select_networks(config: &ScanConfig, filter: &[Network]) -> Vec<Network> {
    if filter.is_empty() {
        return config.networks.clone();
    }
    Network::ALL.into_iter().filter(|network| filter.contains(network)).collect()
}

/// Helper to print whether a directory exists.
pub fn print_dir_status(label: &str, path: &Path) {
    let exists = path.is_dir();
    println!("- {label}: {} ({})", if exists { "OK" } else { "MISSING" }, path.display());
}
