/// End-to-end tests for the CLI
use std::fs;
use tempfile::TempDir;

// Exit code tests for CLI
mod exit_code_tests {
    use assert_cmd::cargo::cargo_bin_cmd;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("azsm").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("azsm").arg("--version").assert().code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("azsm")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("azsm")
            .args(["--snapshot", "x.json", "-f", "invalid_format"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - no analysis target at all
    #[test]
    fn test_exit_code_no_target() {
        cargo_bin_cmd!("azsm")
            .env_remove("AZURE_ACCESS_TOKEN")
            .assert()
            .code(3);
    }

    /// Exit code 3: Application error - snapshot file does not exist
    #[test]
    fn test_exit_code_missing_snapshot() {
        cargo_bin_cmd!("azsm")
            .args(["--snapshot", "/nonexistent/resources.json"])
            .assert()
            .code(3);
    }
}

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// An exported inventory with no resources, the smallest valid snapshot.
fn write_empty_snapshot(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("resources.json");
    fs::write(
        &path,
        r#"{
  "metadata": {
    "subscription_id": "00000000-0000-0000-0000-000000000000",
    "generated_at": "2026-08-01T00:00:00Z"
  },
  "resources": []
}"#,
    )
    .unwrap();
    path
}

#[test]
fn test_e2e_empty_snapshot_table_output() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_empty_snapshot(&dir);

    cargo_bin_cmd!("azsm")
        .args(["--snapshot", snapshot.to_str().unwrap()])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Subscription cost summary (USD)"))
        .stdout(predicate::str::contains("Current monthly cost: 0.00 USD"));
}

#[test]
fn test_e2e_empty_snapshot_json_output() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_empty_snapshot(&dir);

    let output = cargo_bin_cmd!("azsm")
        .args(["--snapshot", snapshot.to_str().unwrap(), "-f", "json"])
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["report"]["currency"], "USD");
    assert_eq!(parsed["resources"].as_array().unwrap().len(), 0);
}

#[test]
fn test_e2e_unsupported_currency_fails_before_pricing() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_empty_snapshot(&dir);

    cargo_bin_cmd!("azsm")
        .args(["--snapshot", snapshot.to_str().unwrap(), "-c", "XYZ"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("XYZ"));
}

#[test]
fn test_e2e_output_file() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_empty_snapshot(&dir);
    let report_path = dir.path().join("report.txt");

    cargo_bin_cmd!("azsm")
        .args([
            "--snapshot",
            snapshot.to_str().unwrap(),
            "-o",
            report_path.to_str().unwrap(),
        ])
        .assert()
        .code(0);

    let content = fs::read_to_string(&report_path).unwrap();
    assert!(content.contains("Subscription cost summary"));
    assert!(!content.contains('\u{1b}'));
}

#[test]
fn test_e2e_export_round_trip() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_empty_snapshot(&dir);
    let export_path = dir.path().join("exported.json");

    cargo_bin_cmd!("azsm")
        .args([
            "--snapshot",
            snapshot.to_str().unwrap(),
            "--export",
            export_path.to_str().unwrap(),
        ])
        .assert()
        .code(0);

    // The exported snapshot is itself analyzable.
    cargo_bin_cmd!("azsm")
        .args(["--snapshot", export_path.to_str().unwrap()])
        .assert()
        .code(0);
}

#[test]
fn test_e2e_config_currency_applies() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_empty_snapshot(&dir);
    let config_path = dir.path().join("azsm.config.yml");
    fs::write(&config_path, "currency: EUR\n").unwrap();

    cargo_bin_cmd!("azsm")
        .args([
            "--snapshot",
            snapshot.to_str().unwrap(),
            "--config",
            config_path.to_str().unwrap(),
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Subscription cost summary (EUR)"));
}

#[test]
fn test_e2e_cli_currency_overrides_config() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_empty_snapshot(&dir);
    let config_path = dir.path().join("azsm.config.yml");
    fs::write(&config_path, "currency: EUR\n").unwrap();

    cargo_bin_cmd!("azsm")
        .args([
            "--snapshot",
            snapshot.to_str().unwrap(),
            "--config",
            config_path.to_str().unwrap(),
            "-c",
            "GBP",
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Subscription cost summary (GBP)"));
}

#[test]
fn test_e2e_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_empty_snapshot(&dir);
    let config_path = dir.path().join("azsm.config.yml");
    fs::write(&config_path, "exchange_rates:\n  EUR: -3\n").unwrap();

    cargo_bin_cmd!("azsm")
        .args([
            "--snapshot",
            snapshot.to_str().unwrap(),
            "--config",
            config_path.to_str().unwrap(),
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("positive number"));
}

#[test]
fn test_e2e_malformed_snapshot_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    cargo_bin_cmd!("azsm")
        .args(["--snapshot", path.to_str().unwrap()])
        .assert()
        .code(3);
}
