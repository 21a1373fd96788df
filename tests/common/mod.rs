//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get an spc command with a clean environment
pub fn spc() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("spc"));
    cmd.env_remove("SPC_WORKBOOK").env_remove("SPC_LOG");
    cmd
}

/// Helper to get an spc command running inside `tmp`
///
/// The user config dir is pointed into the temp directory so a config on the
/// machine running the tests cannot leak in.
pub fn spc_in(tmp: &TempDir) -> Command {
    let mut cmd = spc();
    cmd.current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("xdg"))
        .env("HOME", tmp.path());
    cmd
}

/// Helper to create an initialized project in a temp directory
pub fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    spc_in(&tmp).arg("init").assert().success();
    tmp
}

/// Helper to write a project config with the given limits block
pub fn write_project_config(tmp: &TempDir, yaml: &str) {
    let dir = tmp.path().join(".spc");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yaml"), yaml).unwrap();
}

/// Helper to write a sample data file
pub fn write_samples(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Helper to record one report batch into the default workbook
pub fn record_batch(tmp: &TempDir, samples: &str) {
    spc_in(tmp)
        .args([
            "report", "--samples", samples, "--usl", "20", "--lsl", "0", "--ucl", "18", "--lcl",
            "2",
        ])
        .assert()
        .success();
}

/// Helper to load the workbook JSON written by `spc report`
pub fn read_workbook(tmp: &TempDir, name: &str) -> serde_json::Value {
    let content = fs::read_to_string(tmp.path().join(name)).unwrap();
    serde_json::from_str(&content).unwrap()
}

/// Rows of a named sheet in a workbook JSON value
pub fn sheet_rows<'a>(workbook: &'a serde_json::Value, name: &str) -> &'a Vec<serde_json::Value> {
    workbook["sheets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == name)
        .and_then(|s| s["rows"].as_array())
        .unwrap()
}
