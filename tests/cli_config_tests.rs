//! End-to-end tests for `spoton config` commands.

use serde_json::Value;
use std::fs;

mod fixtures;
use fixtures::*;

fn show_json(env: &TestEnv) -> Value {
    let output = env.run_ok(&["config", "show", "--json"]);
    serde_json::from_str(&stdout(&output)).expect("valid JSON")
}

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_defaults() {
    let env = TestEnv::new();
    let json = show_json(&env);

    assert_eq!(json["config_file"], env.config_path.to_str().unwrap());
    assert_eq!(json["data_dir"], env.data_dir.to_str().unwrap());
    assert_eq!(json["catalog"]["delimiter"], ",");
    assert_eq!(json["catalog"]["files"].as_array().unwrap().len(), 0);
    assert_eq!(json["map"]["center"][0], 47.4245);
    assert_eq!(json["map"]["zoom"], 16);

    // Showing never creates the file
    assert!(!env.config_path.exists());
}

#[test]
fn test_config_show_human_readable() {
    let env = TestEnv::new();
    let output = env.run_ok(&["config", "show"]);
    let stdout = stdout(&output);

    assert!(stdout.contains("SpotOn Configuration"));
    assert!(stdout.contains("Files: (none)"));
    assert!(stdout.contains("Zoom: 16"));
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_persists_values() {
    let env = TestEnv::new();

    env.run_ok(&["config", "set", "catalog.files", "a.csv, b.csv"]);
    env.run_ok(&["config", "set", "catalog.delimiter", ";"]);
    env.run_ok(&["config", "set", "map.center", "\"47.5, 9.4\""]);
    env.run_ok(&["config", "set", "map.zoom", "14"]);

    assert!(env.config_path.exists());
    let toml = fs::read_to_string(&env.config_path).unwrap();
    assert!(toml.contains("[catalog]"));

    let json = show_json(&env);
    assert_eq!(json["catalog"]["files"][1], "b.csv");
    assert_eq!(json["catalog"]["delimiter"], ";");
    assert_eq!(json["map"]["center"][1], 9.4);
    assert_eq!(json["map"]["zoom"], 14);
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let env = TestEnv::new();

    for (key, value) in [
        ("map.zoom", "25"),
        ("map.zoom", "close"),
        ("map.center", "100,9"),
        ("catalog.delimiter", ";;"),
        ("unknown.key", "x"),
    ] {
        let output = env.run(&["config", "set", key, value]);
        assert_eq!(output.status.code(), Some(1), "{key}={value} should fail");
    }

    assert!(!env.config_path.exists());
}

#[test]
fn test_config_data_dir_flag_overrides_config() {
    let env = TestEnv::new();
    let configured = env.root().join("elsewhere");
    env.run_ok(&["config", "set", "paths.data_dir", configured.to_str().unwrap()]);

    let json = show_json(&env);
    assert_eq!(json["paths"]["data_dir"], configured.to_str().unwrap());
    assert_eq!(json["data_dir"], env.data_dir.to_str().unwrap());
}

#[test]
fn test_config_invalid_file_is_error() {
    let env = TestEnv::new();
    fs::create_dir_all(env.config_path.parent().unwrap()).unwrap();
    fs::write(&env.config_path, "[map]\nzoom = \"far\"\n").unwrap();

    let output = env.run(&["config", "show"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to load configuration"));
}
