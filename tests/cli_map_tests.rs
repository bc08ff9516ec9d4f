//! End-to-end tests for `spoton map`.

use serde_json::Value;
use std::fs;

mod fixtures;
use fixtures::*;

fn features(output: &std::process::Output) -> Vec<Value> {
    let json: Value = serde_json::from_str(stdout(output).trim()).expect("valid GeoJSON");
    assert_eq!(json["type"], "FeatureCollection");
    json["features"].as_array().cloned().unwrap_or_default()
}

// ============================================================================
// HTML Output
// ============================================================================

#[test]
fn test_map_html_from_catalog() {
    let env = TestEnv::new();
    let catalog = env.write_catalog("venues.csv", CATALOG_CSV);
    let out = env.root().join("map.html");

    let output = env.run_ok(&[
        "map",
        "--catalog",
        catalog.to_str().unwrap(),
        "--no-user-lists",
        "--output",
        out.to_str().unwrap(),
    ]);

    assert!(stdout(&output).contains("1 layer(s) and 3 marker(s)"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("\"name\":\"venues\""));
    assert!(html.contains("Club X (Nightclub)"));
    assert!(html.contains("Gallus Pub (Bar)"));
    assert!(html.contains("L.control.layers"));
    assert!(!html.contains("Broken"));
}

#[test]
fn test_map_without_sources_is_empty_page() {
    let env = TestEnv::new();
    let output = env.run_ok(&["map", "--no-user-lists"]);

    let html = stdout(&output);
    assert!(html.contains("<!doctype html>"));
    assert!(html.contains("\"overlays\":[]"));
}

// ============================================================================
// GeoJSON Output
// ============================================================================

#[test]
fn test_map_geojson_coordinates_lon_lat() {
    let env = TestEnv::new();
    let catalog = env.write_catalog("venues.csv", CATALOG_CSV);

    let output = env.run_ok(&[
        "map",
        "--catalog",
        catalog.to_str().unwrap(),
        "--no-user-lists",
        "--geojson",
    ]);

    let features = features(&output);
    assert_eq!(features.len(), 3);
    assert_eq!(features[0]["geometry"]["coordinates"][0], 9.3767);
    assert_eq!(features[0]["geometry"]["coordinates"][1], 47.4245);
    assert_eq!(features[0]["properties"]["color"], "red");
    assert_eq!(features[1]["properties"]["color"], "blue");
    assert_eq!(features[2]["properties"]["color"], "green");
}

#[test]
fn test_map_missing_catalog_is_a_warning() {
    let env = TestEnv::new();
    let catalog = env.write_catalog("venues.csv", CATALOG_CSV);
    let missing = env.root().join("missing.csv");

    let output = env.run_ok(&[
        "map",
        "--catalog",
        missing.to_str().unwrap(),
        "--catalog",
        catalog.to_str().unwrap(),
        "--no-user-lists",
        "--geojson",
    ]);

    assert!(stderr(&output).contains("Warning: File not found"));
    let features = features(&output);
    assert_eq!(features.len(), 3);
    assert!(features.iter().all(|f| f["properties"]["layer"] == "venues"));
}

#[test]
fn test_map_semicolon_catalog_with_bom() {
    let env = TestEnv::new();
    let catalog = env.write_catalog("old_town.csv", SEMICOLON_CATALOG_CSV);

    let output = env.run_ok(&[
        "map",
        "--catalog",
        catalog.to_str().unwrap(),
        "--delimiter",
        ";",
        "--no-user-lists",
        "--geojson",
    ]);

    let features = features(&output);
    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["properties"]["name"], "Kaffeehaus");
    assert_eq!(features[0]["properties"]["color"], "gray");
    assert_eq!(features[1]["properties"]["category"], "Bar");
}

#[test]
fn test_map_includes_user_lists() {
    let env = TestEnv::new();
    let catalog = env.write_catalog("venues.csv", CATALOG_CSV);
    env.register("ana");
    env.create_list("ana", "Drinks", &catalog, &["Gallus Pub (Bar)"]);

    let output = env.run_ok(&["map", "--geojson"]);

    let features = features(&output);
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["properties"]["layer"], "User List: Drinks");
}

#[test]
fn test_map_uses_configured_catalog() {
    let env = TestEnv::new();
    let catalog = env.write_catalog("venues.csv", CATALOG_CSV);
    env.run_ok(&["config", "set", "catalog.files", catalog.to_str().unwrap()]);

    let output = env.run_ok(&["map", "--geojson"]);
    assert_eq!(features(&output).len(), 3);
}

#[test]
fn test_map_invalid_delimiter_rejected() {
    let env = TestEnv::new();
    let output = env.run(&["map", "--delimiter", ";;"]);
    assert_ne!(output.status.code(), Some(0));
}
