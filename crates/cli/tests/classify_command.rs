use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;
use vyscan::commands::{classify_command, classify_file};
use vyscan_core::matcher::{Verdict, VerdictReason};

#[test]
fn classify_file_reports_suspicious_calls() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Vault.vy");
    fs::write(&path, "raw_call(target, data)\nraw_call(t, _abi_encode(transfer(address,uint256)))")
        .unwrap();

    let verdict = classify_file(&path).unwrap();
    assert_eq!(verdict.verdict, Verdict::PossiblyVulnerable);
    assert_eq!(verdict.reason, VerdictReason::SuspiciousCall);
    assert_eq!(verdict.evaluated_calls, 2);
    assert_eq!(verdict.suspicious_calls.len(), 1);
    assert_eq!(verdict.suspicious_calls[0].text, "(target, data)");
}

#[test]
fn classify_command_handles_safe_and_flagged_files() {
    let dir = tempdir().unwrap();
    let safe = dir.path().join("Safe.vy");
    let payable = dir.path().join("Payable.vy");
    fs::write(&safe, "@external\ndef foo():\n    pass\n").unwrap();
    fs::write(&payable, "@external\n@payable\ndef deposit():\n    pass\n").unwrap();

    classify_command(&[safe.clone(), payable.clone()], false).unwrap();
    classify_command(&[safe, payable], true).unwrap();
}

#[test]
fn classify_binary_prints_verdicts() {
    let dir = tempdir().unwrap();
    let flagged = dir.path().join("Flagged.vy");
    let guarded = dir.path().join("Guarded.vy");
    fs::write(&flagged, "raw_call(target, data)").unwrap();
    fs::write(&guarded, "raw_call(target, _abi_encode(transfer(address,uint256)))").unwrap();

    cargo_bin_cmd!("vyscan")
        .arg("classify")
        .arg(&flagged)
        .arg(&guarded)
        .assert()
        .success()
        .stdout(predicate::str::contains("Flagged.vy: possibly-vulnerable"))
        .stdout(predicate::str::contains("Guarded.vy: safe"))
        .stdout(predicate::str::contains("offset 0: raw_call(target, data)"))
        .stdout(predicate::str::contains("1 of 2 file(s) possibly vulnerable"));
}

#[test]
fn classify_binary_json_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Plain.vy");
    fs::write(&path, "x: uint256").unwrap();

    let output = cargo_bin_cmd!("vyscan")
        .arg("classify")
        .arg(&path)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let body: serde_json::Value = serde_json::from_slice(&output).expect("classify json");
    assert_eq!(body[0]["verdict"], "safe");
    assert_eq!(body[0]["reason"], "no_raw_call");
}

#[test]
fn classify_requires_a_path() {
    cargo_bin_cmd!("vyscan").arg("classify").assert().failure();
}
