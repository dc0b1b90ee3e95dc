use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use vyscan_core::model::Network;
use vyscan_core::services::{ApiKeyRing, ExplorerClient, NetworkReport, Scanner};
use vyscan_core::workspace::ScanLayout;

use crate::commands::{load_scan_context, select_networks};

/// Persisted summary of one scan pass (`reports/last-scan.json`).
#[derive(Debug, Serialize, Deserialize)]
pub struct ScanSummary {
    pub workspace: String,
    pub started_at: String,
    pub finished_at: String,
    pub networks: Vec<NetworkReport>,
}

impl ScanSummary {
    pub fn total_flagged(&self) -> usize {
        self.networks.iter().map(|n| n.flagged).sum()
    }

    pub fn total_cached(&self) -> usize {
        self.networks.iter().map(NetworkReport::cached).sum()
    }

    pub fn total_evicted(&self) -> usize {
        self.networks.iter().map(|n| n.evicted).sum()
    }
}

pub fn write_scan_summary(layout: &ScanLayout, summary: &ScanSummary) -> Result<()> {
    fs::create_dir_all(&layout.reports_dir).with_context(|| {
        format!("Failed to create reports dir: {}", layout.reports_dir.display())
    })?;
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(&layout.last_report_path, json).with_context(|| {
        format!("Failed to write scan summary: {}", layout.last_report_path.display())
    })
}

/// Scan every selected network's export list, one contract at a time.
pub fn scan_command(
    root: &str,
    config: Option<&str>,
    networks: &[Network],
    json: bool,
) -> Result<()> {
    let ctx = load_scan_context(root, config)?;
    let selected = select_networks(&ctx.config, networks);

    // Resolve every key set before the first request so a missing variable fails fast.
    let mut rings = Vec::with_capacity(selected.len());
    for network in &selected {
        rings.push(ApiKeyRing::from_env(*network)?);
    }

    let mut client = ExplorerClient::new(Duration::from_secs(ctx.config.request_timeout_secs));
    for (network, url) in &ctx.config.api_urls {
        client = client.with_api_url(*network, url.clone());
    }
    let gate = ctx.config.version_gate();
    let scanner = Scanner { cache: &ctx.cache, gate: &gate, fetcher: &client };

    let started_at = Utc::now().to_rfc3339();
    let mut reports = Vec::with_capacity(rings.len());
    for mut ring in rings {
        let network = ring.network();
        info!(%network, keys = ring.len(), "starting network");
        let report = scanner
            .scan_export_list(network, &ctx.export_path(network), &mut ring)
            .with_context(|| format!("Scan of {network} failed"))?;
        reports.push(report);
    }

    let summary = ScanSummary {
        workspace: ctx.config.name.clone(),
        started_at,
        finished_at: Utc::now().to_rfc3339(),
        networks: reports,
    };
    write_scan_summary(&ctx.layout, &summary)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Scan finished ({} network(s)):", summary.networks.len());
    for report in &summary.networks {
        println!(
            "- {}: {} record(s), {} flagged, {} retained, {} evicted, {} cleared, {} skipped",
            report.network,
            report.records,
            report.flagged,
            report.retained,
            report.evicted,
            report.cleared,
            report.skipped
        );
        for address in &report.flagged_addresses {
            println!("    flagged {address}");
        }
    }
    println!(
        "Contracts awaiting audit: {} (newly flagged: {}, evicted: {})",
        summary.total_cached(),
        summary.total_flagged(),
        summary.total_evicted()
    );
    println!("Summary written to {}", ctx.layout.last_report_path.display());

    Ok(())
}
