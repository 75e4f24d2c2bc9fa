//! Integration tests for CLI output behavior
//!
//! Every test runs against its own HOME, working directory and `CSTATS_DIR`,
//! with the endpoint pointed at localhost, so nothing reaches the real API.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use cstats_core::fetch::test_helpers::{LocalServer, refused_url};
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "status": {"error_code": 0},
    "data": [
        {"name": "Bitcoin", "symbol": "BTC", "total_supply": 21000000,
         "quote": {"USD": {"price": 1234.5, "percent_change_1h": 0.25,
                           "percent_change_24h": 2.0, "market_cap": 1.26e12}}},
        {"name": "Ethereum", "symbol": "ETH", "total_supply": 120000000,
         "quote": {"USD": {"price": 3100.0, "percent_change_1h": -0.4,
                           "percent_change_24h": -3.456, "market_cap": 3.7e11}}}
    ],
    "LastTimePulled": "2024-06-01T12:00:00.000000Z"
}"#;

struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new(endpoint: &str) -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let config_dir = root.path().join("project").join(".cstats");
        fs::create_dir_all(&config_dir).expect("Failed to create project config dir");
        fs::create_dir_all(root.path().join("home")).expect("Failed to create home");
        fs::write(
            config_dir.join("config.toml"),
            format!(
                "[api]\nendpoint = \"{}\"\napi_key = \"test-key\"\ntimeout_secs = 5\n",
                endpoint
            ),
        )
        .expect("Failed to write config");
        Self { root }
    }

    fn data_dir(&self) -> std::path::PathBuf {
        self.root.path().join("data")
    }

    fn write_snapshot(&self) {
        fs::create_dir_all(self.data_dir()).unwrap();
        fs::write(self.data_dir().join("crypto_data.json"), SNAPSHOT).unwrap();
    }

    fn write_timestamp(&self, instant: chrono::DateTime<chrono::Utc>) {
        fs::create_dir_all(self.data_dir()).unwrap();
        let document = serde_json::json!({
            "Timestamp": instant.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
        });
        fs::write(
            self.data_dir().join("timestamp.json"),
            serde_json::to_string(&document).unwrap(),
        )
        .unwrap();
    }

    fn run(&self, args: &[&str]) -> Output {
        run_in(self.root.path(), &self.data_dir(), args)
    }
}

fn run_in(root: &Path, data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cstats"))
        .current_dir(root.join("project"))
        .env("HOME", root.join("home"))
        .env("XDG_CONFIG_HOME", root.join("home").join(".config"))
        .env("CSTATS_DIR", data_dir)
        .env_remove("CSTATS_API_KEY")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute cstats")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_list_without_snapshot_explains_next_step() {
    let sandbox = Sandbox::new(&refused_url());
    let output = sandbox.run(&["list"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("cstats refresh"));
}

#[test]
fn test_list_renders_table_and_stdout_is_clean() {
    let sandbox = Sandbox::new(&refused_url());
    sandbox.write_snapshot();
    let output = sandbox.run(&["list"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("$1,234.5"), "got: {}", out);
    assert!(out.contains("▼ 3.46%"));
    assert!(out.contains("21000000 BTC"));
    assert!(!out.contains(r#""event":"#), "stdout should not contain JSON logs");

    // Quiet by default: nothing below error level on stderr
    assert!(
        !stderr(&output).contains(r#""level":"INFO""#),
        "Default mode should not emit INFO logs, got: {}",
        stderr(&output)
    );
}

#[test]
fn test_list_json_sorted_descending_keeps_ranks() {
    let sandbox = Sandbox::new(&refused_url());
    sandbox.write_snapshot();
    let output = sandbox.run(&["list", "--json", "--sort", "change-24h", "--desc"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["symbol"], "BTC");
    assert_eq!(rows[0]["rank"], 1);
    assert_eq!(rows[1]["rank"], 2);
    assert_eq!(rows[1]["day_change"], "▼ 3.46%");
}

#[test]
fn test_show_by_symbol_json() {
    let sandbox = Sandbox::new(&refused_url());
    sandbox.write_snapshot();
    let output = sandbox.run(&["show", "eth", "--json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let detail: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(detail["name"], "Ethereum");
    assert_eq!(detail["rank"], 2);
    assert_eq!(detail["trend"], "down");
    assert_eq!(detail["total_supply"], "1.2e+08 ETH");
}

#[test]
fn test_show_rank_zero_is_first_row() {
    let sandbox = Sandbox::new(&refused_url());
    sandbox.write_snapshot();
    let output = sandbox.run(&["show", "0"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Bitcoin (BTC)"));
}

#[test]
fn test_show_unknown_asset_fails() {
    let sandbox = Sandbox::new(&refused_url());
    sandbox.write_snapshot();
    let output = sandbox.run(&["show", "DOGE"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No asset matching 'DOGE'"));
}

#[test]
fn test_refresh_pulls_when_no_timestamp() {
    let server = LocalServer::once(200, SNAPSHOT);
    let sandbox = Sandbox::new(&server.url);
    let output = sandbox.run(&["refresh", "--json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), r#"[0,"Data pulled from API"]"#);
    assert_eq!(server.join().len(), 1);
    assert!(sandbox.data_dir().join("crypto_data.json").exists());
    assert!(sandbox.data_dir().join("timestamp.json").exists());
}

#[test]
fn test_refresh_within_cooldown_is_rate_limited() {
    let sandbox = Sandbox::new(&refused_url());
    sandbox.write_timestamp(chrono::Utc::now() - chrono::Duration::minutes(30));
    let output = sandbox.run(&["refresh", "--json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output).trim(),
        r#"[4,"API Hourly Pull Exceeded - Try Again Later"]"#
    );
    assert!(!sandbox.data_dir().join("crypto_data.json").exists());
}

#[test]
fn test_refresh_network_failure_exits_non_zero() {
    let sandbox = Sandbox::new(&refused_url());
    let output = sandbox.run(&["refresh", "--json"]);

    assert!(!output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        r#"[2,"Network error. Please check your internet connection."]"#
    );
    assert!(!sandbox.data_dir().join("timestamp.json").exists());
}

#[test]
fn test_refresh_api_error_exits_non_zero() {
    let server = LocalServer::once(401, r#"{"status": {"error_code": 1002}}"#);
    let sandbox = Sandbox::new(&server.url);
    let output = sandbox.run(&["refresh"]);
    server.join();

    assert!(!output.status.success());
    assert!(stdout(&output).contains("API Error: 401"));
}

#[test]
fn test_status_json_before_first_pull() {
    let sandbox = Sandbox::new(&refused_url());
    let output = sandbox.run(&["status", "--json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let status: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(status["last_pull"].is_null());
    assert!(status["next_allowed_pull"].is_null());
    assert!(status["cooldown_remaining_secs"].is_null());
    assert_eq!(status["state"], "idle");
    assert_eq!(status["timestamp_backend"], "file");
    assert!(status["snapshot_assets"].is_null());
}

#[test]
fn test_status_reports_cooldown() {
    let sandbox = Sandbox::new(&refused_url());
    sandbox.write_snapshot();
    let last = chrono::Utc::now() - chrono::Duration::minutes(30);
    sandbox.write_timestamp(last);
    let output = sandbox.run(&["status", "--json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let status: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(status["state"], "cooling_down");
    assert_eq!(status["snapshot_assets"], 2);
    let remaining = status["cooldown_remaining_secs"].as_i64().unwrap();
    assert!(remaining > 85 * 60 && remaining <= 90 * 60, "{}", remaining);

    let next = chrono::DateTime::parse_from_rfc3339(status["next_allowed_pull"].as_str().unwrap())
        .unwrap()
        .with_timezone(&chrono::Utc);
    let expected = last + chrono::Duration::hours(2);
    assert!((next - expected).num_seconds().abs() <= 1, "{} vs {}", next, expected);
}

#[test]
fn test_dashboard_rate_limited_still_renders_table() {
    let sandbox = Sandbox::new(&refused_url());
    sandbox.write_snapshot();
    sandbox.write_timestamp(chrono::Utc::now() - chrono::Duration::minutes(30));
    let output = sandbox.run(&["dashboard", "--sort", "price"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let first_line = out.lines().next().unwrap_or_default();
    assert!(first_line.starts_with("API Hourly Pull Exceeded - Try Again Later"));
    assert!(first_line.contains("Last pulled: 2024-06-01 12:00:00 UTC"));
    assert!(out.contains("Ethereum"));
}

#[test]
fn test_verbose_emits_json_logs_on_stderr() {
    let sandbox = Sandbox::new(&refused_url());
    let output = sandbox.run(&["-v", "list"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains(r#""level":"INFO""#), "got: {}", err);
    assert!(err.contains("cli.list.started"));
    for line in err.lines().filter(|l| !l.trim().is_empty()) {
        assert!(
            serde_json::from_str::<serde_json::Value>(line).is_ok(),
            "stderr line is not JSON: {}",
            line
        );
    }
}
