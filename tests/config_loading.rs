//! Configuration Loading Tests
//!
//! - Config files are JSON with optional keys
//! - The loaded policy drives configured combines
//! - apply() installs the log threshold

use std::fs;

use tempfile::TempDir;
use tupledesc::observability::{Logger, Severity};
use tupledesc::schema::{DuplicateNamePolicy, FieldType, SchemaConfig, TupleDesc};

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("tupledesc.json");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_loaded_config_drives_combine() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(&tmp, r#"{"duplicate_names": "reject"}"#);
    let config = SchemaConfig::load(&path).unwrap();
    assert_eq!(config.duplicate_names, DuplicateNamePolicy::Reject);

    let orders = TupleDesc::with_names(vec![FieldType::Int, FieldType::Int], &["id", "total"])
        .unwrap();
    let users = TupleDesc::with_names(vec![FieldType::Int, FieldType::String], &["id", "name"])
        .unwrap();

    let err = TupleDesc::combine_with_config(&orders, &users, &config).unwrap_err();
    assert_eq!(err.name(), Some("id"));
    assert_eq!(err.index(), Some(2));
}

#[test]
fn test_malformed_file_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(&tmp, "{ not json");
    assert!(SchemaConfig::load(&path).is_err());
}

#[test]
fn test_apply_sets_log_threshold() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(&tmp, r#"{"log_level": "trace"}"#);
    let config = SchemaConfig::load(&path).unwrap();

    config.apply();
    assert_eq!(Logger::min_severity(), Severity::Trace);
    assert!(Logger::enabled(Severity::Trace));

    // Trace-level combine logging must not change the result
    let a = TupleDesc::with_names(vec![FieldType::Int], &["id"]).unwrap();
    let combined = TupleDesc::combine(&a, &a);
    assert_eq!(combined.num_fields(), 2);

    SchemaConfig::default().apply();
    assert_eq!(Logger::min_severity(), Severity::Info);
}
