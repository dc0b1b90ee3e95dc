use vyscan_core::model::Network;
use vyscan_core::workspace::{
    load_scan_config, load_scan_config_from, write_scan_config, ScanConfig, ScanContext,
    ScanLayout,
};

fn write_default_config(layout: &ScanLayout, name: &str) -> ScanConfig {
    std::fs::create_dir_all(&layout.meta_dir).unwrap();
    let config = ScanConfig::new(
        name,
        layout.relative_string(&layout.exports_dir),
        layout.relative_string(&layout.contracts_dir),
    );
    write_scan_config(layout, &config).unwrap();
    config
}

#[test]
fn layout_paths_hang_off_root() {
    let root = tempfile::tempdir().unwrap();
    let layout = ScanLayout::new(root.path());
    assert!(layout.config_path.ends_with(".vyscan/config.json"));
    assert!(layout.last_report_path.ends_with("reports/last-scan.json"));
    assert_eq!(layout.relative_string(&layout.exports_dir), "etherscan-export");
    assert_eq!(layout.resolve("contracts"), layout.contracts_dir);
}

#[test]
fn absolute_directories_are_kept() {
    let root = tempfile::tempdir().unwrap();
    let elsewhere = tempfile::tempdir().unwrap();
    let layout = ScanLayout::new(root.path());
    let abs = elsewhere.path().to_string_lossy().to_string();
    assert_eq!(layout.resolve(&abs), elsewhere.path());
}

#[test]
fn context_loads_config_and_resolves_dirs() {
    let temp = tempfile::tempdir().unwrap();
    let layout = ScanLayout::new(temp.path());
    write_default_config(&layout, "CtxScan");

    let ctx = ScanContext::from_root(temp.path()).expect("context");
    assert_eq!(ctx.config.name, "CtxScan");
    assert_eq!(ctx.config.networks, Network::ALL.to_vec());
    assert_eq!(ctx.exports_dir, layout.exports_dir);
    assert_eq!(ctx.cache.root(), layout.contracts_dir.as_path());
    assert!(ctx.export_path(Network::Celo).ends_with("etherscan-export/celo.csv"));
}

#[test]
fn config_defaults_fill_missing_fields() {
    let temp = tempfile::tempdir().unwrap();
    let layout = ScanLayout::new(temp.path());
    std::fs::create_dir_all(&layout.meta_dir).unwrap();
    std::fs::write(
        &layout.config_path,
        r#"{"name":"Sparse","config_version":"0.1.0","exports_dir":"lists","contracts_dir":"out"}"#,
    )
    .unwrap();

    let config = load_scan_config(&layout).unwrap();
    assert_eq!(config.vulnerable_versions, ["0.2.15", "0.2.16", "0.3.0"]);
    assert_eq!(config.request_timeout_secs, 30);
    assert!(config.version_gate().admits("0.3.0"));
    assert_eq!(config.api_url(Network::Arb), "https://api.arbiscan.io/api");
}

#[test]
fn yaml_config_with_overrides() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("scan.yaml");
    std::fs::write(
        &path,
        "name: Yaml\nconfig_version: 0.1.0\nexports_dir: lists\ncontracts_dir: out\n\
         networks: [ethereum, poly]\nvulnerable_versions: ['0.3.0']\n\
         api_urls:\n  poly: http://localhost:8545/api\n",
    )
    .unwrap();

    let ctx = ScanContext::from_config_file(temp.path(), &path).unwrap();
    assert_eq!(ctx.config.networks, vec![Network::Ethereum, Network::Poly]);
    assert_eq!(ctx.config.api_url(Network::Poly), "http://localhost:8545/api");
    assert!(!ctx.config.version_gate().admits("0.2.16"));
    assert_eq!(ctx.exports_dir, temp.path().join("lists"));
    assert_eq!(ctx.config_path, path);
}

#[test]
fn missing_config_reports_path() {
    let temp = tempfile::tempdir().unwrap();
    let err = ScanContext::from_root(temp.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to read scan config"), "unexpected error: {err}");
}

#[test]
fn invalid_config_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"name":"Bad","config_version":"0.1.0","exports_dir":"a","contracts_dir":"b","networks":[]}"#,
    )
    .unwrap();
    let err = load_scan_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid scan config"), "unexpected error: {err}");
    assert!(format!("{err:#}").contains("at least one network"));
}
