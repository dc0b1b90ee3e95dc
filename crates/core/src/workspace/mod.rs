//! Scan workspace: configuration, on-disk layout, and loading helpers.
//!
//! - `ScanConfig`: serializable workspace settings (`.vyscan/config.json`).
//! - `ScanLayout`: computed paths for workspace directories/files.
//! - `ScanContext`: layout + config + resolved directories, ready for a scan.

mod config;
mod context;
mod layout;
mod util;

pub use config::{ConfigError, ScanConfig};
pub use context::ScanContext;
pub use layout::ScanLayout;
pub use util::{load_scan_config, load_scan_config_from, write_scan_config};
