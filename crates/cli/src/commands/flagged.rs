use anyhow::{Context, Result};
use serde::Serialize;
use vyscan_core::model::Network;

use crate::commands::{load_scan_context, select_networks};
use crate::sha256_file;

#[derive(Debug, Serialize)]
pub struct FlaggedEntry {
    pub network: Network,
    pub address: String,
    pub path: String,
    pub size: u64,
    pub sha256: String,
}

/// List every cached (possibly vulnerable) contract source.
pub fn list_flagged_command(
    root: &str,
    config: Option<&str>,
    networks: &[Network],
    json: bool,
) -> Result<()> {
    let ctx = load_scan_context(root, config)?;

    let mut entries = Vec::new();
    for network in select_networks(&ctx.config, networks) {
        let cached = ctx
            .cache
            .list(network)
            .with_context(|| format!("Failed to list cached contracts for {network}"))?;
        for contract in cached {
            entries.push(FlaggedEntry {
                network,
                sha256: sha256_file(&contract.path)?,
                path: contract.path.display().to_string(),
                address: contract.address,
                size: contract.size,
            });
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Flagged contracts ({}):", entries.len());
    if entries.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for entry in entries {
        println!(
            "  - {} {} [{} bytes] sha256={}",
            entry.network, entry.address, entry.size, entry.sha256
        );
    }

    Ok(())
}
