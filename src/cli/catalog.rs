//! Catalog inspection CLI command.

use crate::cli::common::{parse_delimiter, print_json, CliContext, CliResult};
use crate::models::Location;
use crate::parser::load_locations;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Catalog commands
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    command: CatalogCommand,
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// List the valid locations of a catalog file
    List(CatalogListArgs),
}

/// List the valid locations of a catalog file
#[derive(Args, Debug)]
pub struct CatalogListArgs {
    /// Catalog CSV file
    #[arg(long, value_name = "FILE")]
    catalog: PathBuf,

    /// Field delimiter (defaults to the configured one)
    #[arg(long, value_name = "CHAR", value_parser = parse_delimiter)]
    delimiter: Option<char>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct CatalogOutput<'a> {
    locations: &'a [Location],
    count: usize,
    skipped_rows: usize,
}

impl CatalogArgs {
    /// Execute catalog subcommand
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        match &self.command {
            CatalogCommand::List(args) => args.execute(ctx),
        }
    }
}

impl CatalogListArgs {
    /// Execute list command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let delimiter = self.delimiter.unwrap_or(ctx.config.catalog.delimiter);
        let report = load_locations(&self.catalog, delimiter)?;

        if self.json {
            return print_json(&CatalogOutput {
                locations: &report.locations,
                count: report.locations.len(),
                skipped_rows: report.skipped_rows,
            });
        }

        for location in &report.locations {
            println!(
                "{} {} ({})  {:.6}, {:.6}",
                location.category.emoji(),
                location.name,
                location.category,
                location.latitude,
                location.longitude
            );
        }
        println!();
        println!(
            "{} location(s), {} row(s) skipped",
            report.locations.len(),
            report.skipped_rows
        );

        Ok(())
    }
}
