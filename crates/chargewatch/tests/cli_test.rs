//! Integration tests for the `chargewatch` CLI binary.
//!
//! Argument parsing, help output, shell completions, and configuration run
//! offline; status tests run against a wiremock station endpoint.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const INFO_PATH: &str = "/map-prod/v3/station/info";

const CONFIG_ENV: [&str; 7] = [
    "CHARGEWATCH_API_URL",
    "CHARGEWATCH_TIMEOUT",
    "CHARGEWATCH_POLL_INTERVAL",
    "CHARGEWATCH_VIEW_URL",
    "CHARGEWATCH_STATION_LINK_BASE",
    "CHARGEWATCH_OUTPUT",
    "CHARGEWATCH_COLOR",
];

/// Build a [`Command`] for the `chargewatch` binary with env isolation.
///
/// Clears all `CHARGEWATCH_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn chargewatch_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("chargewatch");
    cmd.env("HOME", "/tmp/chargewatch-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/chargewatch-cli-test-nonexistent")
        .env_remove("RUST_LOG");
    for var in CONFIG_ENV {
        cmd.env_remove(var);
    }
    cmd
}

/// Same as [`chargewatch_cmd`] with config rooted in `dir`.
fn chargewatch_in(dir: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = chargewatch_cmd();
    cmd.env("HOME", dir.path()).env("XDG_CONFIG_HOME", dir.path());
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn station_body(id: u64, statuses: &[&str]) -> serde_json::Value {
    let ports: Vec<_> = statuses
        .iter()
        .enumerate()
        .map(|(i, s)| json!({ "outletNumber": i + 1, "statusV2": s }))
        .collect();
    json!({
        "deviceId": id,
        "name": ["ACME", format!("UNIT {id}")],
        "modelNumber": "CT4021",
        "portsInfo": { "ports": ports }
    })
}

async fn mount_station(server: &MockServer, id: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(INFO_PATH))
        .and(query_param("deviceId", id))
        .respond_with(response)
        .mount(server)
        .await;
}

fn api_url(server: &MockServer) -> String {
    format!("{}{INFO_PATH}", server.uri())
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = chargewatch_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    chargewatch_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("ChargePoint")
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("watch"))
            .and(predicate::str::contains("stations")),
    );
}

#[test]
fn test_version_flag() {
    chargewatch_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("chargewatch"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    chargewatch_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    chargewatch_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Classify ────────────────────────────────────────────────────────

#[test]
fn test_classify_table() {
    chargewatch_cmd()
        .args(["classify", "in_use", "unreachable"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("In Use")
                .and(predicate::str::contains("Unreachable"))
                .and(predicate::str::contains("🔴 Offline")),
        );
}

#[test]
fn test_classify_plain() {
    chargewatch_cmd()
        .args(["-o", "plain", "classify", "maintenance_required", "charging_fault"])
        .assert()
        .success()
        .stdout("maintenance_required\tMaintenance Req.\ncharging_fault\tCHARGING FAULT\n");
}

#[test]
fn test_classify_json() {
    let output = chargewatch_cmd()
        .args(["-o", "json", "classify", "available"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["code"], "available");
    assert_eq!(value[0]["badge"], "available");
    assert_eq!(value[0]["state"], "Online");
}

// ── Stations ────────────────────────────────────────────────────────

#[test]
fn test_stations_set_prints_url() {
    chargewatch_cmd()
        .args([
            "--url",
            "https://dash.example/?theme=dark",
            "stations",
            "set",
            "12, 34;56",
            "78",
        ])
        .assert()
        .success()
        .stdout("https://dash.example/?theme=dark&stations=12,34,56,78\n");
}

#[test]
fn test_stations_set_rejects_garbage() {
    let output = chargewatch_cmd()
        .args(["stations", "set", "abc"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Invalid station list"), "Unexpected output:\n{text}");
}

#[test]
fn test_stations_clear_removes_param() {
    chargewatch_cmd()
        .args([
            "--url",
            "https://dash.example/?stations=1,2&theme=dark",
            "stations",
            "clear",
        ])
        .assert()
        .success()
        .stdout("https://dash.example/?theme=dark\n");
}

#[test]
fn test_stations_show_json() {
    let output = chargewatch_cmd()
        .args(["-o", "json", "--url", "https://dash.example/?stations=5;5;9", "stations", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["stations"][0]["id"], "5");
    assert_eq!(value["stations"][1]["id"], "9");
    assert_eq!(
        value["stations"][1]["link"],
        "https://driver.chargepoint.com/stations/9"
    );
}

// ── Status ──────────────────────────────────────────────────────────

#[test]
fn test_status_without_stations_shows_hint() {
    chargewatch_cmd()
        .args(["--url", "https://dash.example/", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Add ?stations=ID1,ID2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_isolates_failed_station() {
    let server = MockServer::start().await;
    mount_station(&server, "111", ResponseTemplate::new(500)).await;
    mount_station(
        &server,
        "222",
        ResponseTemplate::new(200).set_body_json(station_body(222, &["available", "in_use"])),
    )
    .await;

    chargewatch_cmd()
        .args(["--api-url", &api_url(&server), "-s", "111,222", "-o", "plain", "status"])
        .assert()
        .success()
        .stdout("222\t1\tAvailable\n222\t2\tIn Use\n")
        .stderr(predicate::str::contains("Failed 111: HTTP 500"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_table_merges_station_cells() {
    let server = MockServer::start().await;
    mount_station(
        &server,
        "333",
        ResponseTemplate::new(200)
            .set_body_json(station_body(333, &["available", "unreachable", "in_use"])),
    )
    .await;

    let output = chargewatch_cmd()
        .args(["--api-url", &api_url(&server), "-s", "333", "status", "--links"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("ACME UNIT 333").count(), 1, "{stdout}");
    assert!(stdout.contains("Port 3"));
    assert!(stdout.contains("Unreachable"));
    assert!(stdout.contains("https://driver.chargepoint.com/stations/333"));
    assert!(stdout.contains("Last updated:"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_json_report() {
    let server = MockServer::start().await;
    mount_station(
        &server,
        "444",
        ResponseTemplate::new(200).set_body_json(station_body(444, &["maintenance_required"])),
    )
    .await;
    mount_station(&server, "555", ResponseTemplate::new(404)).await;

    let output = chargewatch_cmd()
        .args(["--api-url", &api_url(&server), "-s", "555 444", "-o", "json", "status"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["tracked"], json!(["555", "444"]));
    assert_eq!(value["stations"][0]["ports"][0]["status"], "Maintenance Req.");
    assert_eq!(value["stations"][0]["firmware"], "Unknown");
    assert_eq!(value["failures"][0]["id"], "555");
    assert_eq!(value["failures"][0]["message"], "HTTP 404");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_with_no_data_fails() {
    let server = MockServer::start().await;
    mount_station(&server, "1", ResponseTemplate::new(503)).await;
    mount_station(&server, "2", ResponseTemplate::new(503)).await;

    let output = chargewatch_cmd()
        .args(["--api-url", &api_url(&server), "-s", "1,2", "status"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(7));
    let text = combined_output(&output);
    assert!(text.contains("No data"), "{text}");
    assert!(text.contains("Failed 1: HTTP 503"), "{text}");
    assert!(text.contains("Failed 2: HTTP 503"), "{text}");
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_follows_xdg() {
    let dir = tempfile::tempdir().unwrap();
    chargewatch_in(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chargewatch").and(predicate::str::contains("config.toml")));
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();

    chargewatch_in(&dir).args(["config", "init"]).assert().success();
    chargewatch_in(&dir)
        .args(["config", "init"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("--force"));
    chargewatch_in(&dir)
        .args(["config", "init", "--force"])
        .assert()
        .success();

    chargewatch_in(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("poll_interval = 60")
                .and(predicate::str::contains("timeout = 30")),
        );
}

#[test]
fn test_env_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    chargewatch_in(&dir)
        .env("CHARGEWATCH_TIMEOUT", "5")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("timeout = 5"));
}

#[test]
fn test_invalid_output_in_env_is_usage_error() {
    chargewatch_cmd()
        .env("CHARGEWATCH_OUTPUT", "xml")
        .args(["classify", "available"])
        .assert()
        .code(2);
}
