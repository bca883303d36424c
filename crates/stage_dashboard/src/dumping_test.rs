use std::fs;

use serde_json::json;
use tempfile::TempDir;

use crate::config::Stage;
use crate::dashboard_definitions::build_dashboard;
use crate::dumping::{check_file_is_up_to_date, serialize_to_file};
use crate::errors::DashboardGeneratorError;

#[test]
fn serialize_to_file_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("dir").join("data.json");
    let data = json!({ "key": [1, 2, 3] });

    serialize_to_file(&data, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.ends_with("}\n"));
    let stored: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(stored, data);
}

#[test]
fn written_dashboard_is_up_to_date() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dashboard.json");
    let dashboard = build_dashboard(&[Stage::new("a1", "Alpha")]);

    serialize_to_file(&dashboard, &path).unwrap();
    check_file_is_up_to_date(&dashboard, &path).unwrap();
}

#[test]
fn key_order_is_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, r#"{"b": 1, "a": [1, 2]}"#).unwrap();

    check_file_is_up_to_date(&json!({ "a": [1, 2], "b": 1 }), &path).unwrap();
}

#[test]
fn changed_dashboard_is_out_of_date() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dashboard.json");
    serialize_to_file(&build_dashboard(&[Stage::new("a1", "Alpha")]), &path).unwrap();

    let result = check_file_is_up_to_date(&build_dashboard(&[Stage::new("b2", "Beta")]), &path);
    assert!(matches!(result, Err(DashboardGeneratorError::OutOfDate { .. })));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let result = check_file_is_up_to_date(&json!({}), &dir.path().join("missing.json"));
    assert!(matches!(result, Err(DashboardGeneratorError::Io { operation: "read", .. })));
}
