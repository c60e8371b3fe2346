#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::fixture;
use std::path::PathBuf;
use tariffwatch_core::errors::ExErrorKind;
use tariffwatch_core::logging_facility::Profile;
use tariffwatch_core::TrackingMode;
use tariffwatch_store::config::{load_config, load_tracked_hts_file, parse_config_str};
use tempfile::TempDir;

#[test]
fn test_load_fixture_config() {
    let config = load_config(&fixture("config.yaml")).unwrap();

    assert_eq!(config.mode, TrackingMode::TrackedOnly);
    assert_eq!(config.tracked_hts, vec!["6111.20", "8703"]);
    assert_eq!(
        config.sources.export_path,
        Some(PathBuf::from("export_week1.csv"))
    );
    assert_eq!(config.storage.retain_weeks, 4);
    assert_eq!(config.storage.snapshots_dir, PathBuf::from("snapshots"));
    assert_eq!(config.runtime.log_profile, Profile::Production);
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = parse_config_str("").unwrap();
    assert_eq!(config.mode, TrackingMode::TrackedOnly);
    assert!(config.tracked_hts.is_empty());
    assert_eq!(config.storage.reports_dir, PathBuf::from("reports"));
    assert_eq!(config.storage.retain_weeks, 12);
    assert_eq!(config.runtime.log_profile, Profile::Development);
}

#[test]
fn test_full_table_mode() {
    let config = parse_config_str("mode: full_table\n").unwrap();
    assert_eq!(config.mode, TrackingMode::FullTable);
}

#[test]
fn test_unknown_mode_is_config_error() {
    let err = parse_config_str("mode: everything\n").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Config);
}

#[test]
fn test_malformed_yaml_is_config_error() {
    let err = parse_config_str("storage: [unclosed\n").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Config);
    assert!(err.message().contains("YAML"));
}

#[test]
fn test_missing_config_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let err = load_config(&dir.path().join("absent.yaml")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Config);
    assert!(err.message().contains("absent.yaml"));
}

#[test]
fn test_tracked_hts_file_skips_blank_and_comment_lines() {
    let codes = load_tracked_hts_file(&fixture("tracked_hts.txt")).unwrap();
    assert_eq!(codes, vec!["6111.20", "8703"]);
}

#[test]
fn test_missing_tracked_hts_file_is_config_error() {
    let err = load_tracked_hts_file(&fixture("no_such_list.txt")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Config);
}
