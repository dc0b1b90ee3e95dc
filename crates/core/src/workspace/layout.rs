use std::path::{Path, PathBuf};

/// Logical layout of a scan workspace on disk.
///
/// This is derived from a chosen root path. It does *not* perform any IO itself.
/// `exports_dir` and `contracts_dir` are the defaults written into a fresh config;
/// a loaded config may point elsewhere (see `ScanContext`).
#[derive(Debug, Clone)]
pub struct ScanLayout {
    /// Root directory of the workspace.
    pub root: PathBuf,
    /// Directory for internal metadata (.vyscan).
    pub meta_dir: PathBuf,
    /// Path to the scan config file (JSON).
    pub config_path: PathBuf,
    /// Default directory for per-network export lists.
    pub exports_dir: PathBuf,
    /// Default directory for cached flagged sources.
    pub contracts_dir: PathBuf,
    /// Directory for scan summary reports.
    pub reports_dir: PathBuf,
    /// Summary of the most recent scan.
    pub last_report_path: PathBuf,
}

impl ScanLayout {
    /// Compute the default layout for a workspace rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let meta_dir = root.join(".vyscan");
        let config_path = meta_dir.join("config.json");
        let exports_dir = root.join("etherscan-export");
        let contracts_dir = root.join("contracts");
        let reports_dir = root.join("reports");
        let last_report_path = reports_dir.join("last-scan.json");

        Self {
            root,
            meta_dir,
            config_path,
            exports_dir,
            contracts_dir,
            reports_dir,
            last_report_path,
        }
    }

    /// Express `path` relative to the root when possible, for storing in `ScanConfig`.
    pub fn relative_string(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(rel) => rel.to_string_lossy().to_string(),
            Err(_) => path.to_string_lossy().to_string(),
        }
    }

    /// Resolve a configured directory (relative to the root, or absolute).
    pub fn resolve(&self, configured: &str) -> PathBuf {
        let path = Path::new(configured);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
