use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cache::ContractCache;
use crate::model::Network;
use crate::workspace::{load_scan_config, load_scan_config_from, ScanConfig, ScanLayout};

/// Convenience wrapper bundling layout, config, and the resolved directories.
#[derive(Debug)]
pub struct ScanContext {
    pub layout: ScanLayout,
    pub config: ScanConfig,
    /// File the config was loaded from.
    pub config_path: PathBuf,
    pub exports_dir: PathBuf,
    pub cache: ContractCache,
}

impl ScanContext {
    /// Load the workspace config for a given root.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self> {
        let layout = ScanLayout::new(root);
        let config = load_scan_config(&layout)?;
        Ok(Self::with_config(layout, config))
    }

    /// Use an explicit config file; relative directories still resolve against `root`.
    pub fn from_config_file(root: impl AsRef<Path>, config_path: &Path) -> Result<Self> {
        let layout = ScanLayout::new(root);
        let config = load_scan_config_from(config_path)?;
        let mut ctx = Self::with_config(layout, config);
        ctx.config_path = config_path.to_path_buf();
        Ok(ctx)
    }

    pub fn with_config(layout: ScanLayout, config: ScanConfig) -> Self {
        let exports_dir = layout.resolve(&config.exports_dir);
        let cache = ContractCache::new(layout.resolve(&config.contracts_dir));
        let config_path = layout.config_path.clone();
        Self { layout, config, config_path, exports_dir, cache }
    }

    /// Export list for `network`: `<exports_dir>/<network>.csv`.
    pub fn export_path(&self, network: Network) -> PathBuf {
        self.exports_dir.join(format!("{network}.csv"))
    }
}
