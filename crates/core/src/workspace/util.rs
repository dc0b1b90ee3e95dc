use std::path::Path;

use anyhow::{Context, Result};

use crate::workspace::{ScanConfig, ScanLayout};

/// Load the scan config from the workspace's default location.
pub fn load_scan_config(layout: &ScanLayout) -> Result<ScanConfig> {
    load_scan_config_from(&layout.config_path)
}

/// Load a scan config file. `.yaml`/`.yml` files are read as YAML, anything else as JSON.
pub fn load_scan_config_from(path: &Path) -> Result<ScanConfig> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scan config at {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let config: ScanConfig = if matches!(ext, "yaml" | "yml") {
        serde_yaml::from_str(&body).context("Failed to parse scan config YAML")?
    } else {
        serde_json::from_str(&body).context("Failed to parse scan config JSON")?
    };
    config.validate().with_context(|| format!("Invalid scan config at {}", path.display()))?;
    Ok(config)
}

/// Serialize `config` to the workspace's default config path.
pub fn write_scan_config(layout: &ScanLayout, config: &ScanConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&layout.config_path, json).with_context(|| {
        format!("Failed to write scan config: {}", layout.config_path.display())
    })
}
