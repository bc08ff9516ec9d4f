//! End-to-end tests for `spoton list` commands.

use serde_json::Value;
use std::fs;

mod fixtures;
use fixtures::*;

fn show_list(env: &TestEnv, name: &str) -> Value {
    let output = env.run_ok(&["list", "show", name, "--json"]);
    serde_json::from_str(&stdout(&output)).unwrap()
}

fn setup() -> (TestEnv, std::path::PathBuf) {
    let env = TestEnv::new();
    let catalog = env.write_catalog("venues.csv", CATALOG_CSV);
    env.register("ana");
    env.register("bob");
    (env, catalog)
}

// ============================================================================
// Create / Show
// ============================================================================

#[test]
fn test_create_and_show_list() {
    let (env, catalog) = setup();
    env.create_list(
        "ana",
        "Date Night",
        &catalog,
        &["Trattoria (Restaurant)", "Club X (Nightclub)"],
    );

    let list = show_list(&env, "Date Night");
    assert_eq!(list["owner"], "ana");
    assert_eq!(list["likes"], 0);
    assert_eq!(list["locations"][0]["name"], "Trattoria");
    assert_eq!(list["locations"][1]["latitude"], 47.4245);
}

#[test]
fn test_create_list_warns_about_unknown_locations() {
    let (env, catalog) = setup();

    let output = env.run_ok(&[
        "list",
        "create",
        "--user",
        "ana",
        "--password",
        "pw",
        "--name",
        "Mixed",
        "--catalog",
        catalog.to_str().unwrap(),
        "--location",
        "Gallus Pub (Bar)",
        "--location",
        "Nowhere (Bar)",
    ]);

    assert!(stderr(&output).contains("Location not found in catalog: Nowhere (Bar)"));
    assert_eq!(show_list(&env, "Mixed")["locations"].as_array().unwrap().len(), 1);
}

#[test]
fn test_create_list_validation_errors() {
    let (env, catalog) = setup();
    env.create_list("ana", "Taken", &catalog, &["Gallus Pub (Bar)"]);

    let base = [
        "list",
        "create",
        "--user",
        "bob",
        "--password",
        "pw",
        "--catalog",
        catalog.to_str().unwrap(),
    ];

    let mut duplicate = base.to_vec();
    duplicate.extend(["--name", "Taken", "--location", "Gallus Pub (Bar)"]);
    assert_eq!(env.run(&duplicate).status.code(), Some(1));

    let mut empty_name = base.to_vec();
    empty_name.extend(["--name", "  ", "--location", "Gallus Pub (Bar)"]);
    assert_eq!(env.run(&empty_name).status.code(), Some(1));

    let mut no_locations = base.to_vec();
    no_locations.extend(["--name", "Empty"]);
    assert_eq!(env.run(&no_locations).status.code(), Some(1));

    let mut wrong_password = vec![
        "list", "create", "--user", "bob", "--password", "nope", "--name", "X",
    ];
    wrong_password.extend(["--location", "Gallus Pub (Bar)"]);
    assert_eq!(env.run(&wrong_password).status.code(), Some(1));
}

#[test]
fn test_show_missing_list() {
    let env = TestEnv::new();
    let output = env.run(&["list", "show", "Ghost"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("List 'Ghost' not found"));
}

// ============================================================================
// Like / Unlike / Leaderboard
// ============================================================================

#[test]
fn test_like_and_unlike() {
    let (env, catalog) = setup();
    env.create_list("ana", "Drinks", &catalog, &["Gallus Pub (Bar)"]);

    let like = ["list", "like", "--user", "bob", "--password", "pw", "Drinks"];
    env.run_ok(&like);
    env.run_ok(&like);
    assert_eq!(show_list(&env, "Drinks")["likes"], 1);

    let unlike = ["list", "unlike", "--user", "bob", "--password", "pw", "Drinks"];
    env.run_ok(&unlike);
    env.run_ok(&unlike);
    assert_eq!(show_list(&env, "Drinks")["likes"], 0);
}

#[test]
fn test_like_missing_list() {
    let (env, _catalog) = setup();
    let output = env.run(&["list", "like", "--user", "bob", "--password", "pw", "Ghost"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_leaderboard_order() {
    let (env, catalog) = setup();
    env.create_list("ana", "Quiet", &catalog, &["Trattoria (Restaurant)"]);
    env.create_list("bob", "Loud", &catalog, &["Club X (Nightclub)"]);
    env.run_ok(&["list", "like", "--user", "ana", "--password", "pw", "Loud"]);
    env.run_ok(&["list", "like", "--user", "bob", "--password", "pw", "Loud"]);

    let output = env.run_ok(&["list", "leaderboard", "--json"]);
    let lists: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(lists[0]["name"], "Loud");
    assert_eq!(lists[0]["likes"], 2);
    assert_eq!(lists[1]["name"], "Quiet");

    let output = env.run_ok(&["list", "leaderboard", "--limit", "1"]);
    let stdout = stdout(&output);
    assert!(stdout.contains("1. Loud by bob (2 like(s)"));
    assert!(!stdout.contains("Quiet"));
}

// ============================================================================
// Edit / Delete
// ============================================================================

#[test]
fn test_edit_rename_carries_likes() {
    let (env, catalog) = setup();
    env.create_list("ana", "Old Name", &catalog, &["Gallus Pub (Bar)"]);
    env.run_ok(&["list", "like", "--user", "bob", "--password", "pw", "Old Name"]);

    env.run_ok(&[
        "list",
        "edit",
        "--user",
        "ana",
        "--password",
        "pw",
        "Old Name",
        "--rename",
        "New Name",
    ]);

    let list = show_list(&env, "New Name");
    assert_eq!(list["likes"], 1);
    assert_eq!(list["locations"][0]["name"], "Gallus Pub");
    assert_eq!(env.run(&["list", "show", "Old Name"]).status.code(), Some(2));

    let output = env.run_ok(&["user", "show", "bob", "--json"]);
    let bob: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(bob["liked_lists"][0], "New Name");
}

#[test]
fn test_edit_replaces_locations() {
    let (env, catalog) = setup();
    env.create_list("ana", "Evening", &catalog, &["Gallus Pub (Bar)"]);

    env.run_ok(&[
        "list",
        "edit",
        "--user",
        "ana",
        "--password",
        "pw",
        "Evening",
        "--catalog",
        catalog.to_str().unwrap(),
        "--location",
        "Trattoria (Restaurant)",
        "--location",
        "Club X (Nightclub)",
    ]);

    let list = show_list(&env, "Evening");
    let names: Vec<_> = list["locations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Trattoria", "Club X"]);
}

#[test]
fn test_edit_and_delete_require_owner() {
    let (env, catalog) = setup();
    env.create_list("ana", "Mine", &catalog, &["Gallus Pub (Bar)"]);

    let output = env.run(&[
        "list", "edit", "--user", "bob", "--password", "pw", "Mine", "--rename", "Stolen",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("belongs to 'ana'"));

    let output = env.run(&["list", "delete", "--user", "bob", "--password", "pw", "Mine"]);
    assert_eq!(output.status.code(), Some(1));

    env.run_ok(&["list", "delete", "--user", "ana", "--password", "pw", "Mine"]);
    assert_eq!(env.run(&["list", "show", "Mine"]).status.code(), Some(2));
}

// ============================================================================
// Save / Unsave
// ============================================================================

#[test]
fn test_save_and_unsave_list() {
    let (env, catalog) = setup();
    env.create_list("ana", "Date Night", &catalog, &["Trattoria (Restaurant)"]);

    env.run_ok(&["list", "save", "--user", "bob", "--password", "pw", "Date Night"]);

    let saved = env.data_dir.join("Date_Night_saved.csv");
    let content = fs::read_to_string(&saved).unwrap();
    assert_eq!(
        content,
        "name,category,latitude,longitude\nTrattoria,Restaurant,47.426,9.378\n"
    );

    let output = env.run_ok(&["user", "show", "bob", "--json"]);
    let bob: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(bob["saved_lists"][0], "Date Night");

    let output = env.run_ok(&["list", "unsave", "--user", "bob", "--password", "pw", "Date Night"]);
    assert!(stdout(&output).contains("removed from saved lists"));

    let output = env.run_ok(&["list", "unsave", "--user", "bob", "--password", "pw", "Date Night"]);
    assert!(stdout(&output).contains("was not saved"));
}
