//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use nectar_core::ExportFormat;

use crate::commands::{self, GenerateOptions};

const CURRENT: &str = r#"{
    "start_date": "2024-10-01",
    "end_date": "2024-12-31",
    "metrics": [
        {"name": "total_users", "value": 12400, "unit": "count"},
        {"name": "bounce_rate", "value": 70.0, "unit": "percent"},
        {"name": "search_ctr", "value": 4.1, "unit": "percent"}
    ]
}"#;

const PRIOR: &str = r#"{
    "start_date": "2023-10-01",
    "end_date": "2023-12-31",
    "metrics": [
        {"name": "total_users", "value": 10000, "unit": "count"},
        {"name": "bounce_rate", "value": 52.0, "unit": "percent"},
        {"name": "search_ctr", "value": 4.0, "unit": "percent"}
    ]
}"#;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn options(dir: &Path) -> GenerateOptions {
    GenerateOptions {
        current: write_file(dir, "current.json", CURRENT),
        prior: write_file(dir, "prior.json", PRIOR),
        client: "Bee Conservancy".to_string(),
        quarter: Some("Q4".to_string()),
        year: Some(2024),
        comparison: "yoy".to_string(),
        significant_threshold: None,
        anomaly_threshold: None,
        top: None,
        export: "all".to_string(),
        output_dir: dir.join("out"),
    }
}

/// Config file with built-in values, so a local override cannot leak into tests
fn explicit_config(dir: &Path) -> PathBuf {
    write_file(
        dir,
        "analysis.toml",
        "[thresholds]\nsignificant_change = 10.0\n",
    )
}

// ========== Generate Command Tests ==========

#[test]
fn test_cmd_generate_writes_all_exports() {
    let dir = tempfile::tempdir().unwrap();
    let config = explicit_config(dir.path());
    let files = commands::cmd_generate(Some(&config), &options(dir.path())).unwrap();

    assert_eq!(files.len(), 3);
    assert!(files.iter().all(|f| f.exists()));
    assert!(files[0].ends_with("Bee_Conservancy_Q4_2024_report.json"));

    let json = fs::read_to_string(&files[0]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["metadata"]["comparison_label"], "Q4 2024 vs Q4 2023");
}

#[test]
fn test_cmd_generate_without_quarter_uses_snapshot_dates() {
    let dir = tempfile::tempdir().unwrap();
    let config = explicit_config(dir.path());
    let mut opts = options(dir.path());
    opts.quarter = None;
    opts.year = None;
    opts.export = "json".to_string();

    let files = commands::cmd_generate(Some(&config), &opts).unwrap();
    let json = fs::read_to_string(&files[0]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value["metadata"]["period_label"],
        "2024-10-01 to 2024-12-31"
    );
}

#[test]
fn test_cmd_generate_export_none() {
    let dir = tempfile::tempdir().unwrap();
    let config = explicit_config(dir.path());
    let mut opts = options(dir.path());
    opts.export = "none".to_string();

    let files = commands::cmd_generate(Some(&config), &opts).unwrap();
    assert!(files.is_empty());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_cmd_generate_rejects_invalid_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let config = explicit_config(dir.path());
    let mut opts = options(dir.path());
    opts.significant_threshold = Some(-5.0);

    let err = commands::cmd_generate(Some(&config), &opts).unwrap_err();
    assert!(err.to_string().contains("Invalid threshold override"));
}

#[test]
fn test_cmd_generate_missing_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let config = explicit_config(dir.path());
    let mut opts = options(dir.path());
    opts.prior = dir.path().join("missing.json");

    assert!(commands::cmd_generate(Some(&config), &opts).is_err());
}

#[test]
fn test_cmd_generate_duplicate_metric_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = explicit_config(dir.path());
    let mut opts = options(dir.path());
    opts.current = write_file(
        dir.path(),
        "dupe.json",
        r#"{"start_date": "2024-10-01", "end_date": "2024-12-31", "metrics": [
            {"name": "sessions", "value": 1, "unit": "count"},
            {"name": "sessions", "value": 2, "unit": "count"}
        ]}"#,
    );

    let err = commands::cmd_generate(Some(&config), &opts).unwrap_err();
    assert!(err.to_string().contains("Invalid snapshot"));
}

#[test]
fn test_cmd_generate_bad_quarter() {
    let dir = tempfile::tempdir().unwrap();
    let config = explicit_config(dir.path());
    let mut opts = options(dir.path());
    opts.quarter = Some("Q7".to_string());

    assert!(commands::cmd_generate(Some(&config), &opts).is_err());
}

#[test]
fn test_parse_export_formats() {
    assert_eq!(
        commands::parse_export_formats("all").unwrap(),
        vec![ExportFormat::Json, ExportFormat::Csv]
    );
    assert!(commands::parse_export_formats("none").unwrap().is_empty());
    assert_eq!(
        commands::parse_export_formats("csv").unwrap(),
        vec![ExportFormat::Csv]
    );
    assert_eq!(
        commands::parse_export_formats("json, csv").unwrap(),
        vec![ExportFormat::Json, ExportFormat::Csv]
    );
    assert!(commands::parse_export_formats("pptx").is_err());
}

// ========== Other Command Tests ==========

#[test]
fn test_cmd_benchmarks() {
    let dir = tempfile::tempdir().unwrap();
    let config = explicit_config(dir.path());
    assert!(commands::cmd_benchmarks(Some(&config)).is_ok());
}

#[test]
fn test_cmd_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = explicit_config(dir.path());
    assert!(commands::cmd_config(Some(&config)).is_ok());
}

#[test]
fn test_cmd_config_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(dir.path(), "bad.toml", "[thresholds]\nanomaly = 0.0\n");
    assert!(commands::cmd_config(Some(&config)).is_err());
}

#[test]
fn test_cmd_periods() {
    assert!(commands::cmd_periods("Q1", 2025, "qoq").is_ok());
    assert!(commands::cmd_periods("q4", 2024, "yoy").is_ok());
    assert!(commands::cmd_periods("Q5", 2024, "yoy").is_err());
    assert!(commands::cmd_periods("Q1", 2024, "mom").is_err());
}

#[test]
fn test_load_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "current.json", CURRENT);
    let snapshot = commands::load_snapshot(&path).unwrap();
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.value("search_ctr"), Some(4.1));
}
