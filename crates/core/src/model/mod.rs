//! Core data model: supported networks, contract records, and the version gate.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Compiler versions affected by the reentrancy lock bug.
pub const DEFAULT_VULNERABLE_VERSIONS: [&str; 3] = ["0.2.15", "0.2.16", "0.3.0"];

/// Chains with an Etherscan-compatible explorer API.
///
/// Declaration order is the order networks are scanned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Arb,
    Avax,
    Celo,
    Ethereum,
    Ftm,
    Gnosis,
    Moonbeam,
    Op,
    Poly,
}

impl Network {
    pub const ALL: [Network; 9] = [
        Network::Arb,
        Network::Avax,
        Network::Celo,
        Network::Ethereum,
        Network::Ftm,
        Network::Gnosis,
        Network::Moonbeam,
        Network::Op,
        Network::Poly,
    ];

    /// Short name used for directories, export files and CLI flags.
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Arb => "arb",
            Network::Avax => "avax",
            Network::Celo => "celo",
            Network::Ethereum => "ethereum",
            Network::Ftm => "ftm",
            Network::Gnosis => "gnosis",
            Network::Moonbeam => "moonbeam",
            Network::Op => "op",
            Network::Poly => "poly",
        }
    }

    pub fn default_api_url(self) -> &'static str {
        match self {
            Network::Arb => "https://api.arbiscan.io/api",
            Network::Avax => "https://api.snowtrace.io/api",
            Network::Celo => "https://api.celoscan.io/api",
            Network::Ethereum => "https://api.etherscan.io/api",
            Network::Ftm => "https://api.ftmscan.com/api",
            Network::Gnosis => "https://api.gnosisscan.io/api",
            Network::Moonbeam => "https://api-moonbeam.moonscan.io/api",
            Network::Op => "https://api-optimistic.etherscan.io/api",
            Network::Poly => "https://api.polygonscan.com/api",
        }
    }

    /// Environment variable holding the comma-separated API keys for this network.
    pub fn api_key_var(self) -> &'static str {
        match self {
            Network::Arb => "ARBISCAN_API_KEY",
            Network::Avax => "SNOWTRACE_API_KEY",
            Network::Celo => "CELOSCAN_API_KEY",
            Network::Ethereum => "ETHERSCAN_API_KEY",
            Network::Ftm => "FTMSCAN_API_KEY",
            Network::Gnosis => "GNOSISSCAN_API_KEY",
            Network::Moonbeam => "MOONSCAN_API_KEY",
            Network::Op => "OPTIMISTIC_ETHERSCAN_API_KEY",
            Network::Poly => "POLYGONSCAN_API_KEY",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown network '{0}'. Allowed: arb, avax, celo, ethereum, ftm, gnosis, moonbeam, op, poly")]
pub struct ParseNetworkError(pub String);

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Network::ALL
            .into_iter()
            .find(|network| network.as_str() == wanted)
            .ok_or_else(|| ParseNetworkError(s.to_string()))
    }
}

/// One row of a network's export list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub network: Network,
    pub address: String,
    pub compiler_version: String,
}

impl ContractRecord {
    pub fn new(
        network: Network,
        address: impl Into<String>,
        compiler_version: impl Into<String>,
    ) -> Self {
        Self { network, address: address.into(), compiler_version: compiler_version.into() }
    }
}

/// Set of compiler versions worth analysing. Membership is exact string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGate {
    versions: BTreeSet<String>,
}

impl VersionGate {
    pub fn new<I, S>(versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { versions: versions.into_iter().map(Into::into).collect() }
    }

    pub fn admits(&self, version: &str) -> bool {
        self.versions.contains(version)
    }

    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.versions.iter().map(String::as_str)
    }
}

impl Default for VersionGate {
    fn default() -> Self {
        Self::new(DEFAULT_VULNERABLE_VERSIONS)
    }
}
