use std::fs;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use vyscan_core::model::Network;
use vyscan_core::workspace::{write_scan_config, ScanConfig, ScanLayout};

use crate::commands::{load_scan_context, print_dir_status};
use crate::{canonicalize_or_current, infer_workspace_name};

#[derive(Debug, Serialize)]
pub struct WorkspaceInfo {
    pub name: String,
    pub root: String,
    pub config_file: String,
    pub config_version: String,
    pub vulnerable_versions: Vec<String>,
    pub exports_dir: String,
    pub contracts_dir: String,
    pub networks: Vec<NetworkStatus>,
}

#[derive(Debug, Serialize)]
pub struct NetworkStatus {
    pub network: Network,
    pub api_url: String,
    pub export_list: String,
    pub export_list_present: bool,
    pub cached_contracts: usize,
}

/// Initialize a new scan workspace at `root`.
pub fn init_workspace_command(root: &str, name: Option<String>, force: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let layout = ScanLayout::new(&root_path);

    if layout.config_path.exists() && !force {
        return Err(anyhow!(
            "Scan workspace already initialized at {} (use --force to overwrite the config)",
            layout.config_path.display()
        ));
    }

    let workspace_name = match name {
        Some(n) => n,
        None => infer_workspace_name(&root_path),
    };

    for (label, dir) in [
        ("meta dir", &layout.meta_dir),
        ("exports dir", &layout.exports_dir),
        ("contracts dir", &layout.contracts_dir),
        ("reports dir", &layout.reports_dir),
    ] {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {label}: {}", dir.display()))?;
    }

    let config = ScanConfig::new(
        &workspace_name,
        layout.relative_string(&layout.exports_dir),
        layout.relative_string(&layout.contracts_dir),
    );
    write_scan_config(&layout, &config)?;

    println!("Initialized vyscan workspace:");
    println!("  Name: {}", workspace_name);
    println!("  Root: {}", layout.root.display());
    println!("  Config: {}", layout.config_path.display());
    println!("  Exports dir: {}", layout.exports_dir.display());
    println!("  Contracts dir: {}", layout.contracts_dir.display());
    println!("  Reports dir: {}", layout.reports_dir.display());
    println!();
    println!("Drop one <network>.csv (address,compilerVersion) per network into the exports dir.");

    Ok(())
}

/// Show configuration and per-network state of an existing workspace.
pub fn workspace_info_command(root: &str, config: Option<&str>, json: bool) -> Result<()> {
    let ctx = load_scan_context(root, config)?;

    let mut networks = Vec::new();
    for network in &ctx.config.networks {
        let export = ctx.export_path(*network);
        let cached = ctx
            .cache
            .list(*network)
            .with_context(|| format!("Failed to list cached contracts for {network}"))?;
        networks.push(NetworkStatus {
            network: *network,
            api_url: ctx.config.api_url(*network).to_string(),
            export_list_present: export.is_file(),
            export_list: export.display().to_string(),
            cached_contracts: cached.len(),
        });
    }

    if json {
        let info = WorkspaceInfo {
            name: ctx.config.name.clone(),
            root: ctx.layout.root.display().to_string(),
            config_file: ctx.config_path.display().to_string(),
            config_version: ctx.config.config_version.clone(),
            vulnerable_versions: ctx.config.vulnerable_versions.clone(),
            exports_dir: ctx.exports_dir.display().to_string(),
            contracts_dir: ctx.cache.root().display().to_string(),
            networks,
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("vyscan Workspace Info");
    println!("=====================");
    println!("Name: {}", ctx.config.name);
    println!("Root: {}", ctx.layout.root.display());
    println!("Config file: {}", ctx.config_path.display());
    println!("Config version: {}", ctx.config.config_version);
    println!("Vulnerable versions: {}", ctx.config.vulnerable_versions.join(", "));
    println!();

    println!("Directories:");
    print_dir_status("Exports dir", &ctx.exports_dir);
    print_dir_status("Contracts dir", ctx.cache.root());
    print_dir_status("Reports dir", &ctx.layout.reports_dir);
    println!();

    println!("Networks:");
    for status in networks {
        let export = if status.export_list_present { "export list OK" } else { "no export list" };
        println!(
            "- {} [{}] cached: {} -- {}",
            status.network, export, status.cached_contracts, status.api_url
        );
    }

    Ok(())
}
