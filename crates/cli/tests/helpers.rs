use std::fs;
use std::path::Path;

use tempfile::tempdir;
use vyscan::{canonicalize_or_current, infer_workspace_name, sha256_file};

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let original = std::env::current_dir().expect("cwd");
    let tmp = tempdir().expect("tempdir");
    std::env::set_current_dir(tmp.path()).expect("chdir tmp");

    let result = canonicalize_or_current(".").expect("canonicalize").canonicalize().expect("canon");
    let expected = tmp.path().canonicalize().expect("canon tmp");
    assert_eq!(result, expected);

    std::env::set_current_dir(original).expect("restore cwd");
}

#[test]
fn canonicalize_or_current_keeps_absolute_missing_path() {
    let tmp = tempdir().expect("tempdir");
    let missing = tmp.path().join("not-yet");
    let result = canonicalize_or_current(missing.to_str().unwrap()).expect("canonicalize");
    assert_eq!(result, missing);
}

#[test]
fn infer_workspace_name_uses_last_path_component() {
    assert_eq!(infer_workspace_name(Path::new("/tmp/vyper-audit")), "vyper-audit");
    assert_eq!(infer_workspace_name(Path::new("/")), "unnamed-scan");
}

#[test]
fn sha256_file_matches_known_hash() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("abc.vy");
    fs::write(&path, b"abc").unwrap();
    assert_eq!(
        sha256_file(&path).unwrap(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn sha256_file_errors_on_missing_file() {
    let tmp = tempdir().expect("tempdir");
    let err = sha256_file(&tmp.path().join("missing.vy")).unwrap_err();
    assert!(err.to_string().contains("Failed to open file for hashing"));
}
