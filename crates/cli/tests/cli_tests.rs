//! CLI integration tests

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const SAMPLE_DOCUMENT: &str = r#"{
  "finalStatus": "FAILED",
  "finalMessage": "Unstable application instance",
  "exitReason": "CONTAINER_LIMIT_EXCEEDED",
  "clusterName": "prod-east",
  "containers": [
    {
      "containerId": "container_e01_0001",
      "component": "master",
      "host": "node-1.cluster.local",
      "state": 3,
      "createTime": 1700000000000,
      "startTime": 1700000005000
    },
    {
      "containerId": "container_e01_0002",
      "component": "worker",
      "host": "node-2.cluster.local",
      "state": 4,
      "exitCode": 137,
      "diagnostics": "Container killed on request. Exit code is 137"
    }
  ],
  "recentFailedContainers": ["container_e01_0002"]
}"#;

/// Run the CLI with an isolated home directory so no user config is read
fn appdiag(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_appdiag"))
        .args(args)
        .env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn write_document(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let home = TempDir::new().unwrap();
    let output = appdiag(home.path(), &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("Application Diagnostics"), "Should show app name");
    for command in ["show", "containers", "container", "validate", "normalize"] {
        assert!(stdout.contains(command), "Should show {} command", command);
    }
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let home = TempDir::new().unwrap();
    let output = appdiag(home.path(), &["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("appdiag"), "Should show binary name");
}

#[test]
fn test_show_overview() {
    let home = TempDir::new().unwrap();
    let path = write_document(&home, "report.json", SAMPLE_DOCUMENT);

    let output = appdiag(home.path(), &["show", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Show should succeed");
    assert!(stdout.contains("FAILED"));
    assert!(stdout.contains("CONTAINER_LIMIT_EXCEEDED"));
    assert!(stdout.contains("container_e01_0001"));
    assert!(stdout.contains("container_e01_0002"));
}

#[test]
fn test_show_json_drops_unknown_fields() {
    let home = TempDir::new().unwrap();
    let path = write_document(&home, "report.json", SAMPLE_DOCUMENT);

    let output = appdiag(home.path(), &["--format", "json", "show", path.to_str().unwrap()]);
    assert!(output.status.success(), "Show json should succeed");

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["finalStatus"], "FAILED");
    assert_eq!(value["containers"].as_array().unwrap().len(), 2);
    assert!(value.get("clusterName").is_none());
}

#[test]
fn test_containers_failed_only() {
    let home = TempDir::new().unwrap();
    let path = write_document(&home, "report.json", SAMPLE_DOCUMENT);

    let output = appdiag(
        home.path(),
        &["-f", "json", "containers", path.to_str().unwrap(), "--failed-only"],
    );
    assert!(output.status.success(), "Containers should succeed");

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let containers = value.as_array().unwrap();
    assert_eq!(containers.len(), 1);
    assert_eq!(containers[0]["containerId"], "container_e01_0002");
    assert_eq!(containers[0]["exitCode"], 137);
}

#[test]
fn test_container_detail() {
    let home = TempDir::new().unwrap();
    let path = write_document(&home, "report.json", SAMPLE_DOCUMENT);

    let output = appdiag(
        home.path(),
        &["container", path.to_str().unwrap(), "container_e01_0002"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Container should succeed");
    assert!(stdout.contains("node-2.cluster.local"));
    assert!(stdout.contains("Exit code is 137"));
}

#[test]
fn test_container_missing() {
    let home = TempDir::new().unwrap();
    let path = write_document(&home, "report.json", SAMPLE_DOCUMENT);

    let output = appdiag(
        home.path(),
        &["container", path.to_str().unwrap(), "container_e01_0099"],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "Unknown container should fail");
    assert!(stderr.contains("container_e01_0099"));
}

#[test]
fn test_validate_success() {
    let home = TempDir::new().unwrap();
    let path = write_document(&home, "report.json", SAMPLE_DOCUMENT);

    let output = appdiag(home.path(), &["validate", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Validate should succeed");
    assert!(stdout.contains("2 containers"));
    assert!(stdout.contains("1 recently failed"));
}

#[test]
fn test_validate_malformed_document() {
    let home = TempDir::new().unwrap();
    let path = write_document(&home, "broken.json", r#"{"finalMessage": "cut-short-here", "#);

    let output = appdiag(home.path(), &["validate", path.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "Malformed document should fail");
    assert!(stderr.contains("Invalid diagnostics document"));
    assert!(stderr.contains("cut-short-here"), "Offending input should be logged");
}

#[test]
fn test_validate_missing_file() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("absent.json");

    let output = appdiag(home.path(), &["validate", missing.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Failed to read document"));
}

#[test]
fn test_normalize_to_file() {
    let home = TempDir::new().unwrap();
    let path = write_document(&home, "report.json", SAMPLE_DOCUMENT);
    let target = home.path().join("normalized.json");

    let output = appdiag(
        home.path(),
        &[
            "normalize",
            path.to_str().unwrap(),
            "--output",
            target.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "Normalize should succeed");

    let normalized = std::fs::read_to_string(&target).unwrap();
    assert!(!normalized.contains("clusterName"));

    let value: serde_json::Value = serde_json::from_str(&normalized).unwrap();
    assert_eq!(value["recentFailedContainers"][0], "container_e01_0002");
}

#[test]
fn test_show_reads_stdin() {
    let home = TempDir::new().unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_appdiag"))
        .args(["--format", "json", "show", "-"])
        .env("HOME", home.path())
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{"finalStatus": "SUCCEEDED", "exitReason": "APP_FINISHED"}"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "Show from stdin should succeed");

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["finalStatus"], "SUCCEEDED");
    assert_eq!(value["exitReason"], "APP_FINISHED");
    assert!(value.get("finalMessage").is_none());
}

#[test]
fn test_config_default_format() {
    let home = TempDir::new().unwrap();
    let path = write_document(&home, "report.json", SAMPLE_DOCUMENT);
    let config = write_document(&home, "appdiag.json", r#"{"default_format": "json"}"#);

    let output = appdiag(
        home.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "validate",
            path.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "Validate should succeed");

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["container_count"], 2);
    assert_eq!(value["failed_container_count"], 1);
}
