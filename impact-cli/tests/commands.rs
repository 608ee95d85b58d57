//! Run the `impact` binary against a fixture CSV.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const CSV: &str = "\
Name,year,Web of Science Documents,Times Cited,Category Normalized Citation Impact,Documents in Top 1%
US,2020,100,500,1.2,5
US,2021,200,900,0.9,8
China,2020,400,1200,0.8,3
China,2021,500,1600,0.95,6
";

fn fixture(dir: &Path) -> PathBuf {
    let path = dir.join("pubs.csv");
    std::fs::write(&path, CSV).unwrap();
    path
}

fn impact(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_impact"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn summary_prints_indicators() {
    let dir = tempfile::tempdir().unwrap();
    let data = fixture(dir.path());
    let out = impact(
        dir.path(),
        &["--data", data.to_str().unwrap(), "summary", "--entity", "US"],
    );
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("300"));
    assert!(stdout.contains("1.00"));
    assert!(stdout.contains("US"));
}

#[test]
fn charts_prints_four_specs() {
    let dir = tempfile::tempdir().unwrap();
    let data = fixture(dir.path());
    let out = impact(dir.path(), &["--data", data.to_str().unwrap(), "charts", "--all"]);
    assert!(out.status.success());
    let specs: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let kinds: Vec<&str> = specs
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["line", "line", "bubble", "bar"]);
}

#[test]
fn export_writes_into_out_dir() {
    let dir = tempfile::tempdir().unwrap();
    let data = fixture(dir.path());
    let out_dir = dir.path().join("exports");
    let out = impact(
        dir.path(),
        &[
            "--data",
            data.to_str().unwrap(),
            "export",
            "--out",
            out_dir.to_str().unwrap(),
        ],
    );
    assert!(out.status.success());
    let bundle = std::fs::read_dir(&out_dir).unwrap().next().unwrap().unwrap().path();
    assert!(bundle.join("aggregates.csv").is_file());
    assert!(bundle.join("dashboard.json").is_file());
}

#[test]
fn missing_data_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = impact(dir.path(), &["--data", "nope.csv", "entities"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("nope.csv"));
}

#[test]
fn explicit_config_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let out = impact(dir.path(), &["--config", "missing.toml", "entities"]);
    assert!(!out.status.success());
}
