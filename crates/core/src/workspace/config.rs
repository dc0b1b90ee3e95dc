use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Network, VersionGate, DEFAULT_VULNERABLE_VERSIONS};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

fn default_vulnerable_versions() -> Vec<String> {
    DEFAULT_VULNERABLE_VERSIONS.iter().map(|v| v.to_string()).collect()
}

fn default_networks() -> Vec<Network> {
    Network::ALL.to_vec()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Scan config must list at least one vulnerable compiler version")]
    NoVersions,
    #[error("Scan config must list at least one network")]
    NoNetworks,
    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Serializable configuration describing a scan workspace.
///
/// This lives at `.vyscan/config.json` in the workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Human-friendly workspace name.
    pub name: String,
    /// Optional description / notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Schema/config version. This is about the config format, not compiler versions.
    pub config_version: String,
    /// Compiler versions that make a record worth analysing.
    #[serde(default = "default_vulnerable_versions")]
    pub vulnerable_versions: Vec<String>,
    /// Networks to scan, in order.
    #[serde(default = "default_networks")]
    pub networks: Vec<Network>,
    /// Directory holding `<network>.csv` export lists (typically relative to the root).
    pub exports_dir: String,
    /// Directory holding cached flagged sources (typically relative to the root).
    pub contracts_dir: String,
    /// Per-network explorer API URL overrides.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub api_urls: BTreeMap<Network, String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ScanConfig {
    /// Create a configuration with default versions and every supported network.
    pub fn new(
        name: impl Into<String>,
        exports_dir: impl Into<String>,
        contracts_dir: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            config_version: "0.1.0".to_string(),
            vulnerable_versions: default_vulnerable_versions(),
            networks: default_networks(),
            exports_dir: exports_dir.into(),
            contracts_dir: contracts_dir.into(),
            api_urls: BTreeMap::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vulnerable_versions.is_empty() {
            return Err(ConfigError::NoVersions);
        }
        if self.networks.is_empty() {
            return Err(ConfigError::NoNetworks);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn version_gate(&self) -> VersionGate {
        VersionGate::new(self.vulnerable_versions.iter().cloned())
    }

    /// Configured API URL for `network`, falling back to the public explorer.
    pub fn api_url(&self, network: Network) -> &str {
        self.api_urls.get(&network).map(String::as_str).unwrap_or(network.default_api_url())
    }
}
