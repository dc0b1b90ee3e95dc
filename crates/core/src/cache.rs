//! On-disk cache of flagged contract sources.
//!
//! One file per (network, address) at `<root>/<network>/<address>.vy`. A file
//! exists only while its contract's latest verdict is "possibly vulnerable", so
//! the directory tree doubles as the list of contracts to audit.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Network;

const SOURCE_EXTENSION: &str = "vy";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Address {0:?} cannot be used as a cache file name")]
    InvalidAddress(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> CacheError + '_ {
    move |source| CacheError::Io { path: path.to_path_buf(), source }
}

/// Addresses become file names; anything that could leave the network directory is refused.
fn check_address(address: &str) -> CacheResult<()> {
    let escapes = address.is_empty()
        || address.contains(['/', '\\'])
        || address.contains("..")
        || address.chars().any(char::is_control);
    if escapes {
        return Err(CacheError::InvalidAddress(address.to_string()));
    }
    Ok(())
}

/// A cached source file as found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedContract {
    pub network: Network,
    pub address: String,
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct ContractCache {
    root: PathBuf,
}

impl ContractCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn network_dir(&self, network: Network) -> PathBuf {
        self.root.join(network.as_str())
    }

    pub fn contract_path(&self, network: Network, address: &str) -> CacheResult<PathBuf> {
        check_address(address)?;
        Ok(self.network_dir(network).join(format!("{address}.{SOURCE_EXTENSION}")))
    }

    pub fn ensure_network_dir(&self, network: Network) -> CacheResult<PathBuf> {
        let dir = self.network_dir(network);
        fs::create_dir_all(&dir).map_err(io_err(&dir))?;
        Ok(dir)
    }

    pub fn contains(&self, network: Network, address: &str) -> bool {
        self.contract_path(network, address).is_ok_and(|path| path.is_file())
    }

    /// Cached source text, or `None` when nothing is cached for this contract.
    pub fn read(&self, network: Network, address: &str) -> CacheResult<Option<String>> {
        let path = self.contract_path(network, address)?;
        match fs::read_to_string(&path) {
            Ok(body) => Ok(Some(body)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }

    pub fn store(&self, network: Network, address: &str, source: &str) -> CacheResult<PathBuf> {
        let path = self.contract_path(network, address)?;
        self.ensure_network_dir(network)?;
        fs::write(&path, source).map_err(io_err(&path))?;
        Ok(path)
    }

    /// Remove a cached file. Returns whether a file was actually removed.
    pub fn evict(&self, network: Network, address: &str) -> CacheResult<bool> {
        let path = self.contract_path(network, address)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }

    /// Cached contracts for one network, sorted by address.
    pub fn list(&self, network: Network) -> CacheResult<Vec<CachedContract>> {
        let dir = self.network_dir(network);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir).map_err(io_err(&dir))? {
            let entry = entry.map_err(io_err(&dir))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
                continue;
            }
            let metadata = entry.metadata().map_err(io_err(&path))?;
            if !metadata.is_file() {
                continue;
            }
            let Some(address) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
            else {
                continue;
            };
            entries.push(CachedContract { network, address, path, size: metadata.len() });
        }

        entries.sort_by(|a, b| a.address.cmp(&b.address));
        Ok(entries)
    }
}
