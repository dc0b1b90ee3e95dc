use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use vyscan_core::matcher::{self, CallSpan, Verdict, VerdictReason};

#[derive(Debug, Serialize)]
pub struct FileVerdict {
    pub path: String,
    pub verdict: Verdict,
    pub reason: VerdictReason,
    pub evaluated_calls: usize,
    pub skipped_calls: usize,
    pub suspicious_calls: Vec<CallSpan>,
}

pub fn classify_file(path: &Path) -> Result<FileVerdict> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file {}", path.display()))?;
    let result = matcher::analyze(&source);
    Ok(FileVerdict {
        path: path.display().to_string(),
        verdict: result.verdict,
        reason: result.reason,
        evaluated_calls: result.spans.len(),
        skipped_calls: result.skipped_occurrences,
        suspicious_calls: result.suspicious_spans().cloned().collect(),
    })
}

/// Run the matcher over local source files without touching any cache.
pub fn classify_command(paths: &[PathBuf], json: bool) -> Result<()> {
    let verdicts = paths.iter().map(|p| classify_file(p)).collect::<Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&verdicts)?);
        return Ok(());
    }

    for file in &verdicts {
        println!("{}: {} ({:?})", file.path, file.verdict.as_str(), file.reason);
        for call in &file.suspicious_calls {
            println!("  - offset {}: raw_call{}", call.offset, call.text);
        }
    }
    let flagged = verdicts.iter().filter(|v| v.verdict.is_vulnerable()).count();
    println!("{} of {} file(s) possibly vulnerable", flagged, verdicts.len());

    Ok(())
}
