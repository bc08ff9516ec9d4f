//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Catalog with one venue per category plus one malformed row.
pub const CATALOG_CSV: &str = "Name,Coordinates,Type\n\
Club X,\"47.4245,9.3767\",Nightclub\n\
Gallus Pub,\"47.4250,9.3770\",Bar\n\
Trattoria,\"47.4260,9.3780\",Restaurant\n\
Broken,not-a-coordinate,Bar\n";

/// Semicolon-delimited catalog with a BOM-prefixed header.
pub const SEMICOLON_CATALOG_CSV: &str = "\u{feff}Name;Coordinates;Type\n\
Kaffeehaus;47.4230, 9.3740;Cafe\n\
Bierhof;\"47.4240,9.3750\";Bar\n";

/// Path to the spoton binary (set by cargo at compile time)
pub fn spoton_bin() -> &'static str {
    env!("CARGO_BIN_EXE_spoton")
}

/// Isolated data directory and config file for one test.
pub struct TestEnv {
    /// Keeps the temporary directory alive
    pub temp_dir: TempDir,
    /// Data directory passed with --data-dir
    pub data_dir: PathBuf,
    /// Config file passed with --config
    pub config_path: PathBuf,
}

impl TestEnv {
    /// Creates a fresh environment with empty data and no config file.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("data");
        let config_path = temp_dir.path().join("config").join("config.toml");
        Self {
            temp_dir,
            data_dir,
            config_path,
        }
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes a catalog file into the temp directory and returns its path.
    pub fn write_catalog(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content).expect("Failed to write catalog");
        path
    }

    /// Builds a command with the isolated data directory and config file.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(spoton_bin());
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env_remove("RUST_LOG")
            .env_remove("SPOTON_PASSWORD");
        cmd
    }

    /// Runs a command and returns its output.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute command")
    }

    /// Runs a command and asserts it exits with code 0.
    pub fn run_ok(&self, args: &[&str]) -> Output {
        let output = self.run(args);
        assert_eq!(
            output.status.code(),
            Some(0),
            "Command {:?} failed. stderr: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    /// Registers a user with password "pw" and one activity.
    pub fn register(&self, user: &str) {
        self.run_ok(&[
            "user",
            "register",
            "--user",
            user,
            "--password",
            "pw",
            "--activity",
            "Sightseeing",
        ]);
    }

    /// Creates a list for `user` from labels resolved against `catalog`.
    pub fn create_list(&self, user: &str, name: &str, catalog: &Path, labels: &[&str]) {
        let catalog = catalog.to_str().expect("utf-8 path");
        let mut args = vec![
            "list", "create", "--user", user, "--password", "pw", "--name", name, "--catalog",
            catalog,
        ];
        for label in labels {
            args.push("--location");
            args.push(*label);
        }
        self.run_ok(&args);
    }
}

/// Stdout of a command as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr of a command as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
