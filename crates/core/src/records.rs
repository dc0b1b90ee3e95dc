//! Reader for per-network export lists.
//!
//! Each list is a header-less CSV of `address,compilerVersion` rows, as exported
//! from the explorers' verified-contracts pages. Extra columns are ignored.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{ContractRecord, Network};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Failed to open export list {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Failed to parse export list: {0}")]
    Csv(#[from] csv::Error),
    #[error("Line {line}: expected `address,compilerVersion`, found {fields} field(s)")]
    MalformedRow { line: u64, fields: usize },
}

/// Read every record from the export list at `path`.
pub fn read_export_list(network: Network, path: &Path) -> Result<Vec<ContractRecord>, RecordError> {
    let reader = csv_builder()
        .from_path(path)
        .map_err(|source| RecordError::Open { path: path.to_path_buf(), source })?;
    collect_records(network, reader)
}

/// Same as [`read_export_list`] over any reader.
pub fn parse_export_list<R: io::Read>(
    network: Network,
    input: R,
) -> Result<Vec<ContractRecord>, RecordError> {
    collect_records(network, csv_builder().from_reader(input))
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true).trim(csv::Trim::All);
    builder
}

fn collect_records<R: io::Read>(
    network: Network,
    mut reader: csv::Reader<R>,
) -> Result<Vec<ContractRecord>, RecordError> {
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        match (row.get(0), row.get(1)) {
            (Some(address), Some(version)) => {
                records.push(ContractRecord::new(network, address, version));
            }
            _ => return Err(RecordError::MalformedRow { line, fields: row.len() }),
        }
    }
    Ok(records)
}
