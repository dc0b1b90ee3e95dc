use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::{CacheError, ContractCache};
use crate::matcher;
use crate::model::{ContractRecord, Network, VersionGate};
use crate::records::{read_export_list, RecordError};
use crate::services::explorer::{FetchError, SourceFetcher, SourceRequest};
use crate::services::keys::ApiKeyRing;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Records(#[from] RecordError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error("Failed to fetch {address} on {network}: {source}")]
    Fetch {
        network: Network,
        address: String,
        #[source]
        source: FetchError,
    },
}

/// What happened to a single export-list record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// Listed compiler version is not in the gate.
    Skipped,
    /// Cached source re-classified as still possibly vulnerable.
    Retained,
    /// Cached source re-classified as safe and removed.
    Evicted,
    /// Freshly fetched source flagged and written to the cache.
    Flagged { compiler_version: String },
    /// Freshly fetched source looks safe; nothing written.
    Cleared { compiler_version: String },
}

/// Per-network tally of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkReport {
    pub network: Network,
    pub records: usize,
    pub skipped: usize,
    pub retained: usize,
    pub evicted: usize,
    pub flagged: usize,
    pub cleared: usize,
    pub flagged_addresses: Vec<String>,
    pub evicted_addresses: Vec<String>,
}

impl NetworkReport {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            records: 0,
            skipped: 0,
            retained: 0,
            evicted: 0,
            flagged: 0,
            cleared: 0,
            flagged_addresses: Vec::new(),
            evicted_addresses: Vec::new(),
        }
    }

    pub fn record(&mut self, address: &str, outcome: &RecordOutcome) {
        self.records += 1;
        match outcome {
            RecordOutcome::Skipped => self.skipped += 1,
            RecordOutcome::Retained => self.retained += 1,
            RecordOutcome::Evicted => {
                self.evicted += 1;
                self.evicted_addresses.push(address.to_string());
            }
            RecordOutcome::Flagged { .. } => {
                self.flagged += 1;
                self.flagged_addresses.push(address.to_string());
            }
            RecordOutcome::Cleared { .. } => self.cleared += 1,
        }
    }

    /// Contracts left in the cache by this pass (newly flagged plus retained).
    pub fn cached(&self) -> usize {
        self.flagged + self.retained
    }
}

/// Sequential scanner: one record at a time, cache first, fetch on a miss.
pub struct Scanner<'a> {
    pub cache: &'a ContractCache,
    pub gate: &'a VersionGate,
    pub fetcher: &'a dyn SourceFetcher,
}

impl<'a> Scanner<'a> {
    /// Read `<network>.csv` at `path` and scan every record in it.
    pub fn scan_export_list(
        &self,
        network: Network,
        path: &Path,
        keys: &mut ApiKeyRing,
    ) -> Result<NetworkReport, ScanError> {
        let records = read_export_list(network, path)?;
        info!(%network, records = records.len(), path = %path.display(), "scanning export list");
        self.scan_records(network, &records, keys)
    }

    pub fn scan_records(
        &self,
        network: Network,
        records: &[ContractRecord],
        keys: &mut ApiKeyRing,
    ) -> Result<NetworkReport, ScanError> {
        self.cache.ensure_network_dir(network)?;
        let mut report = NetworkReport::new(network);
        for record in records {
            let outcome = self.process(record, keys)?;
            report.record(&record.address, &outcome);
        }
        info!(
            %network,
            flagged = report.flagged,
            retained = report.retained,
            evicted = report.evicted,
            cleared = report.cleared,
            skipped = report.skipped,
            "network done"
        );
        Ok(report)
    }

    /// Classify one record, keeping the cache in step with the verdict.
    pub fn process(
        &self,
        record: &ContractRecord,
        keys: &mut ApiKeyRing,
    ) -> Result<RecordOutcome, ScanError> {
        let network = record.network;
        let address = record.address.as_str();

        if !self.gate.admits(&record.compiler_version) {
            debug!(%network, address, version = %record.compiler_version, "version not affected");
            return Ok(RecordOutcome::Skipped);
        }

        if let Some(source) = self.cache.read(network, address)? {
            if matcher::classify(&source).is_vulnerable() {
                info!(%network, address, "cached contract still flagged");
                return Ok(RecordOutcome::Retained);
            }
            self.cache.evict(network, address)?;
            warn!(%network, address, "narrowed down to non vulnerable, removed from cache");
            return Ok(RecordOutcome::Evicted);
        }

        info!(%network, address, version = %record.compiler_version, "fetching source");
        let request = SourceRequest { network, address, api_key: keys.next_key() };
        let fetched = self.fetcher.fetch(&request).map_err(|source| ScanError::Fetch {
            network,
            address: address.to_string(),
            source,
        })?;

        if matcher::classify(&fetched.source).is_vulnerable() {
            let path = self.cache.store(network, address, &fetched.source)?;
            info!(%network, address, path = %path.display(), "could be vulnerable, saved");
            Ok(RecordOutcome::Flagged { compiler_version: fetched.compiler_version })
        } else {
            info!(%network, address, "contract looks safe");
            Ok(RecordOutcome::Cleared { compiler_version: fetched.compiler_version })
        }
    }
}
