//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set a configuration value
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set a configuration value
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Key: paths.data_dir, catalog.files, catalog.delimiter, map.center or map.zoom
    key: String,

    /// New value (comma-separated for catalog.files, "lat,lon" for map.center)
    value: String,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    config_file: String,
    data_dir: String,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(ctx),
            ConfigCommand::Set(args) => args.execute(ctx),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        if self.json {
            return print_json(&ConfigOutput {
                config_file: ctx.config_path.to_string_lossy().to_string(),
                data_dir: ctx.data_dir.to_string_lossy().to_string(),
                config: &ctx.config,
            });
        }

        output_human_readable(ctx);
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut config = ctx.config.clone();
        config
            .set(&self.key, &self.value)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        config
            .save_to(&ctx.config_path)
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(ctx: &CliContext) {
    let config = &ctx.config;

    println!("SpotOn Configuration");
    println!("====================");
    println!("File: {}", ctx.config_path.display());
    println!();

    println!("Paths:");
    println!("  Data Directory: {}", ctx.data_dir.display());
    println!();

    println!("Catalog:");
    if config.catalog.files.is_empty() {
        println!("  Files: (none)");
    } else {
        println!("  Files:");
        for file in &config.catalog.files {
            println!("    - {}", file.display());
        }
    }
    println!("  Delimiter: '{}'", config.catalog.delimiter);
    println!();

    println!("Map:");
    println!(
        "  Center: {}, {}",
        config.map.center[0], config.map.center[1]
    );
    println!("  Zoom: {}", config.map.zoom);
}
