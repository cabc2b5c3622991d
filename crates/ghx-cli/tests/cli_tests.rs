//! CLI integration tests for ghx-cli
//!
//! Tests command parsing, output formatting, and config handling.

use std::path::Path;
use std::process::Command;

/// Helper to run the CLI with an isolated config file
fn run_ghx(config: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_ghx"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn workspace() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    (dir, config)
}

// ==================== Help & Version Tests ====================

#[test]
fn test_cli_help() {
    let (_dir, config) = workspace();
    let output = run_ghx(&config, &["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ghx"));
    assert!(stdout.contains("validate"));
    assert!(stdout.contains("simulate"));
    assert!(stdout.contains("schedule"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_cli_version() {
    let (_dir, config) = workspace();
    let output = run_ghx(&config, &["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("ghx"));
}

#[test]
fn test_cli_simulate_help() {
    let (_dir, config) = workspace();
    let output = run_ghx(&config, &["simulate", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--secrets"));
    assert!(stdout.contains("--preset"));
    assert!(stdout.contains("--release-after"));
}

// ==================== Validate Tests ====================

#[test]
fn test_validate_mainnet_preset() {
    let (_dir, config) = workspace();
    let output = run_ghx(&config, &["--json", "validate", "--preset", "mainnet"]);
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["status"], "valid");
    assert_eq!(json["lockPools"], 7);
    assert_eq!(json["instantTransfers"], 2);
    assert_eq!(json["totalSupply"], "880000000");
    assert_eq!(json["totalLocked"], "519200000");
    assert_eq!(json["totalInstant"], "360800000");
}

#[test]
fn test_validate_human_output() {
    let (_dir, config) = workspace();
    let output = run_ghx(&config, &["validate", "--preset", "testnet"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Distribution is valid"));
}

#[test]
fn test_validate_rejects_mismatched_pool() {
    let (dir, config) = workspace();
    let params = dir.path().join("params.json");
    std::fs::write(
        &params,
        r#"{
            "totalTokenSupply": "1000 tokens",
            "lockPools": [{
                "name": "Team",
                "lockedAmount": "1000 tokens",
                "beneficiaryAddress": "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf",
                "releaseSchedule": {
                    "startTime": 1700000000,
                    "cliffDuration": 3600,
                    "cliffAmount": "100 tokens",
                    "numSteps": 3,
                    "stepDuration": 3600,
                    "stepAmount": "100 tokens"
                }
            }]
        }"#,
    )
    .unwrap();

    let output = run_ghx(&config, &["--json", "validate", params.to_str().unwrap()]);
    assert!(!output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["success"], false);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("invalid params for Team lock pool"));
}

#[test]
fn test_validate_unknown_preset() {
    let (_dir, config) = workspace();
    let output = run_ghx(&config, &["validate", "--preset", "devnet"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("devnet"));
}

#[test]
fn test_validate_requires_a_source() {
    let (_dir, config) = workspace();
    let output = run_ghx(&config, &["validate"]);
    assert!(!output.status.success());
}

// ==================== Simulate Tests ====================

#[test]
fn test_simulate_mainnet() {
    let (_dir, config) = workspace();
    let output = run_ghx(&config, &["--json", "simulate", "--preset", "mainnet"]);
    assert!(output.status.success());
    let json = json_stdout(&output);

    let result = &json["result"];
    assert!(result["tokenAddress"].as_str().unwrap().starts_with("0x"));
    let pools = result["lockPools"].as_array().unwrap();
    assert_eq!(pools.len(), 7);
    assert_eq!(pools[0]["name"], "Team");
    assert_eq!(result["instantTransfers"].as_array().unwrap().len(), 2);
    // token, then custody/approve/lock per pool, then the transfers
    assert_eq!(json["transactions"], 1 + 7 * 3 + 2);
}

#[test]
fn test_simulate_with_secrets() {
    let (dir, config) = workspace();
    let secrets = dir.path().join("secrets.json");
    std::fs::write(
        &secrets,
        r#"{"privateKey": "0x0000000000000000000000000000000000000000000000000000000000000001"}"#,
    )
    .unwrap();

    let output = run_ghx(
        &config,
        &[
            "--json",
            "simulate",
            "--preset",
            "mainnet",
            "--secrets",
            secrets.to_str().unwrap(),
        ],
    );
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(
        json["deployer"].as_str().unwrap().to_lowercase(),
        "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
    );
}

#[test]
fn test_simulate_rejects_bad_key() {
    let (dir, config) = workspace();
    let secrets = dir.path().join("secrets.json");
    std::fs::write(&secrets, r#"{"privateKey": "0x1234"}"#).unwrap();

    let output = run_ghx(
        &config,
        &["simulate", "--preset", "mainnet", "--secrets", secrets.to_str().unwrap()],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid private key"));
}

#[test]
fn test_simulate_release_after_cliff() {
    let (_dir, config) = workspace();
    let output = run_ghx(
        &config,
        &[
            "--json",
            "simulate",
            "--preset",
            "testnet",
            "--start-time",
            "1700000000",
            "--release-after",
            "46800",
        ],
    );
    assert!(output.status.success());
    let json = json_stdout(&output);
    let releases = json["releases"].as_array().unwrap();
    assert_eq!(releases.len(), 6);
    // Team: cliff of 66M tokens
    assert_eq!(releases[0]["name"], "Team");
    assert_eq!(releases[0]["released"], "66000000000000000000000000");
    assert!(releases.iter().all(|r| r.get("released").is_some()));
}

#[test]
fn test_simulate_release_before_cliff_reports_errors() {
    let (_dir, config) = workspace();
    let output = run_ghx(
        &config,
        &[
            "--json",
            "simulate",
            "--preset",
            "testnet",
            "--start-time",
            "1700000000",
            "--release-after",
            "60",
        ],
    );
    assert!(output.status.success());
    let json = json_stdout(&output);
    let releases = json["releases"].as_array().unwrap();
    assert!(releases
        .iter()
        .all(|r| r["error"].as_str().unwrap().contains("called before cliff end")));
}

// ==================== Schedule Tests ====================

#[test]
fn test_schedule_single_pool() {
    let (_dir, config) = workspace();
    let output = run_ghx(
        &config,
        &["--json", "schedule", "--preset", "mainnet", "--pool", "Strategic partnership"],
    );
    assert!(output.status.success());
    let json = json_stdout(&output);
    let pools = json["lockPools"].as_array().unwrap();
    assert_eq!(pools.len(), 1);
    let unlocks = pools[0]["unlocks"].as_array().unwrap();
    assert_eq!(unlocks.len(), 2);
    assert_eq!(unlocks[0]["step"], 0);
    assert_eq!(unlocks[1]["step"], 1);
    assert_eq!(unlocks[1]["cumulative"], pools[0]["lockedAmount"]);
}

#[test]
fn test_schedule_human_output() {
    let (_dir, config) = workspace();
    let output = run_ghx(&config, &["schedule", "--preset", "mainnet", "--pool", "Team"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cliff"));
    assert!(stdout.contains("step 18"));
    assert!(stdout.contains("132000000 tokens"));
}

#[test]
fn test_schedule_limits_huge_step_count() {
    let (dir, config) = workspace();
    let params = dir.path().join("params.json");
    std::fs::write(
        &params,
        r#"{
            "totalTokenSupply": "10 tokens",
            "lockPools": [{
                "name": "Drip",
                "lockedAmount": "0",
                "beneficiaryAddress": "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf",
                "releaseSchedule": {
                    "startTime": 1700000000,
                    "cliffDuration": 0,
                    "cliffAmount": "0",
                    "numSteps": 18446744073709551615,
                    "stepDuration": 0,
                    "stepAmount": "0"
                }
            }]
        }"#,
    )
    .unwrap();

    let output = run_ghx(
        &config,
        &["--json", "schedule", params.to_str().unwrap(), "--limit", "5"],
    );
    assert!(output.status.success());
    let json = json_stdout(&output);
    let pool = &json["lockPools"][0];
    assert_eq!(pool["unlocks"].as_array().unwrap().len(), 5);
    assert_eq!(pool["truncated"], true);
    assert_eq!(pool["totalUnlocks"].to_string(), "18446744073709551616");

    let output = run_ghx(&config, &["schedule", params.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("step 99"));
    assert!(!stdout.contains("step 100"));
    assert!(stdout.contains("100 of 18446744073709551616 unlocks shown"));
}

#[test]
fn test_schedule_full_timeline_is_not_truncated() {
    let (_dir, config) = workspace();
    let output = run_ghx(&config, &["--json", "schedule", "--preset", "mainnet", "--pool", "Team"]);
    assert!(output.status.success());
    let json = json_stdout(&output);
    let pool = &json["lockPools"][0];
    assert_eq!(pool["unlocks"].as_array().unwrap().len(), 19);
    assert_eq!(pool["totalUnlocks"], 19);
    assert_eq!(pool["truncated"], false);
}

#[test]
fn test_validate_accepts_bare_integer_amounts() {
    let (dir, config) = workspace();
    let params = dir.path().join("params.json");
    std::fs::write(
        &params,
        r#"{
            "totalTokenSupply": 38720000000000000000000000,
            "instantTransfers": [{
                "name": "Liquidity Reserve",
                "beneficiaryAddress": "0xC429A23072935c3dA626B47B57Abba3699Eab032",
                "tokenAmount": 38720000000000000000000000
            }]
        }"#,
    )
    .unwrap();

    let output = run_ghx(&config, &["--json", "validate", params.to_str().unwrap()]);
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["totalSupply"], "38720000");
    assert_eq!(json["totalInstant"], "38720000");
}

#[test]
fn test_schedule_unknown_pool() {
    let (_dir, config) = workspace();
    let output = run_ghx(&config, &["--json", "schedule", "--preset", "mainnet", "--pool", "Nope"]);
    assert!(!output.status.success());
    let json = json_stdout(&output);
    assert!(json["error"].as_str().unwrap().contains("Unknown lock pool: Nope"));
}

// ==================== Config Tests ====================

#[test]
fn test_config_set_and_show() {
    let (_dir, config) = workspace();
    let output = run_ghx(
        &config,
        &["--json", "config", "--set-gas-limit", "4000123", "--set-block-time", "5"],
    );
    assert!(output.status.success());
    assert_eq!(json_stdout(&output)["status"], "saved");
    assert!(config.exists());

    let output = run_ghx(&config, &["--json", "config", "--show"]);
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["gas_limit"], 4_000_123);
    assert_eq!(json["block_time"], 5);
    assert!(json["gas_price"].is_null());
}

#[test]
fn test_config_show_human_output() {
    let (_dir, config) = workspace();
    let output = run_ghx(&config, &["config", "--show"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Gas Limit: default"));
    assert!(stdout.contains("Block Time: 12s"));
}

#[test]
fn test_config_rejects_zero_block_time() {
    let (_dir, config) = workspace();
    let output = run_ghx(&config, &["config", "--set-block-time", "0"]);
    assert!(!output.status.success());
    assert!(!config.exists());
}

#[test]
fn test_config_gas_limit_applies_to_simulation() {
    let (_dir, config) = workspace();
    // Below the 21000 floor: every transaction is rejected
    let output = run_ghx(&config, &["config", "--set-gas-limit", "20000"]);
    assert!(output.status.success());

    let output = run_ghx(&config, &["--json", "simulate", "--preset", "mainnet"]);
    assert!(!output.status.success());
    assert!(json_stdout(&output)["error"]
        .as_str()
        .unwrap()
        .contains("Deployment failed"));
}
