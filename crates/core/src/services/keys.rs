use std::env;

use thiserror::Error;

use crate::model::Network;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Missing API keys for {network}: set {var} (comma-separated for several keys)")]
    MissingVar { network: Network, var: &'static str },
    #[error("No API keys found in {var} for {network}")]
    Empty { network: Network, var: &'static str },
}

/// Round-robin ring over one network's API keys.
///
/// Every call to [`ApiKeyRing::next_key`] hands out the following key and wraps
/// around forever, spreading requests across the explorer's per-key rate limits.
#[derive(Debug, Clone)]
pub struct ApiKeyRing {
    network: Network,
    keys: Vec<String>,
    cursor: usize,
}

impl ApiKeyRing {
    /// Build a ring from a comma-separated list. Whitespace is trimmed and blanks dropped.
    pub fn parse(network: Network, raw: &str) -> Result<Self, KeyError> {
        let keys: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect();
        if keys.is_empty() {
            return Err(KeyError::Empty { network, var: network.api_key_var() });
        }
        Ok(Self { network, keys, cursor: 0 })
    }

    /// Read the network's key variable (e.g. `ETHERSCAN_API_KEY`).
    pub fn from_env(network: Network) -> Result<Self, KeyError> {
        let var = network.api_key_var();
        let raw = env::var(var).map_err(|_| KeyError::MissingVar { network, var })?;
        Self::parse(network, &raw)
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn next_key(&mut self) -> &str {
        let idx = self.cursor;
        self.cursor = (self.cursor + 1) % self.keys.len();
        &self.keys[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_keys() {
        let mut ring = ApiKeyRing::parse(Network::Ethereum, "a, b ,c").unwrap();
        let seen: Vec<String> = (0..7).map(|_| ring.next_key().to_string()).collect();
        assert_eq!(seen, ["a", "b", "c", "a", "b", "c", "a"]);
    }

    #[test]
    fn single_key_repeats() {
        let mut ring = ApiKeyRing::parse(Network::Op, "only").unwrap();
        assert_eq!(ring.next_key(), "only");
        assert_eq!(ring.next_key(), "only");
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn blank_list_is_rejected() {
        let err = ApiKeyRing::parse(Network::Celo, " , ,").unwrap_err();
        assert_eq!(err, KeyError::Empty { network: Network::Celo, var: "CELOSCAN_API_KEY" });
    }
}
