use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;
use vyscan::commands::{init_workspace_command, list_flagged_command};
use vyscan_core::model::Network;
use vyscan_core::workspace::ScanLayout;

#[test]
fn flagged_lists_cached_sources_with_hashes() {
    let temp = tempdir().unwrap();
    let root = temp.path().to_string_lossy().to_string();
    init_workspace_command(&root, Some("Flagged".into()), false).unwrap();
    let layout = ScanLayout::new(temp.path());
    fs::create_dir_all(layout.contracts_dir.join("poly")).unwrap();
    fs::write(layout.contracts_dir.join("poly/0xabc.vy"), "abc").unwrap();

    let output = cargo_bin_cmd!("vyscan")
        .arg("flagged")
        .arg("--root")
        .arg(temp.path())
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let body: serde_json::Value = serde_json::from_slice(&output).expect("flagged json");
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["network"], "poly");
    assert_eq!(entries[0]["address"], "0xabc");
    assert_eq!(entries[0]["size"], 3);
    assert_eq!(
        entries[0]["sha256"],
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn flagged_human_output_handles_empty_cache() {
    let temp = tempdir().unwrap();
    let root = temp.path().to_string_lossy().to_string();
    init_workspace_command(&root, None, false).unwrap();

    cargo_bin_cmd!("vyscan")
        .arg("flagged")
        .arg("--root")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Flagged contracts (0)"))
        .stdout(predicate::str::contains("(none)"));
}

#[test]
fn flagged_network_filter_is_applied() {
    let temp = tempdir().unwrap();
    let root = temp.path().to_string_lossy().to_string();
    init_workspace_command(&root, None, false).unwrap();
    let layout = ScanLayout::new(temp.path());
    fs::create_dir_all(layout.contracts_dir.join("arb")).unwrap();
    fs::write(layout.contracts_dir.join("arb/0x1.vy"), "x").unwrap();

    list_flagged_command(&root, None, &[Network::Arb], false).unwrap();
    list_flagged_command(&root, None, &[Network::Op], true).unwrap();
}
