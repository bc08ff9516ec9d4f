//! Map composition CLI command.

use crate::cli::common::{parse_delimiter, CliContext, CliError, CliResult};
use crate::map::{render_html, to_geojson, ComposedMap};
use crate::services::{MapRequest, MapService};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Compose the map and write it as HTML or GeoJSON
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Catalog CSV file (repeatable, replaces the configured catalogs)
    #[arg(long = "catalog", value_name = "FILE")]
    catalogs: Vec<PathBuf>,

    /// Catalog field delimiter (defaults to the configured one)
    #[arg(long, value_name = "CHAR", value_parser = parse_delimiter)]
    delimiter: Option<char>,

    /// Leave user-created lists off the map
    #[arg(long)]
    no_user_lists: bool,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit GeoJSON instead of an HTML page
    #[arg(long)]
    geojson: bool,
}

impl MapArgs {
    /// Execute the map command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut request = MapRequest::from_config(&ctx.config);
        if !self.catalogs.is_empty() {
            request.catalog_files = self.catalogs.clone();
        }
        if let Some(delimiter) = self.delimiter {
            request.delimiter = delimiter;
        }
        request.include_user_lists = !self.no_user_lists;

        let store = if request.include_user_lists {
            Some(ctx.open_store()?)
        } else {
            None
        };

        let map = MapService::build(&request, store.as_ref());

        for diagnostic in &map.diagnostics {
            eprintln!("Warning: {}", diagnostic.message);
        }

        let rendered = self.render(&map)?;

        match &self.output {
            Some(path) => {
                fs::write(path, rendered).map_err(|e| {
                    CliError::io(format!("Failed to write {}: {e}", path.display()))
                })?;
                println!(
                    "Wrote map with {} layer(s) and {} marker(s) to {}",
                    map.overlays.len(),
                    map.marker_count(),
                    path.display()
                );
            }
            None => println!("{rendered}"),
        }

        Ok(())
    }

    fn render(&self, map: &ComposedMap) -> CliResult<String> {
        if self.geojson {
            serde_json::to_string_pretty(&to_geojson(map))
                .map_err(|e| CliError::io(format!("Failed to serialize GeoJSON: {e}")))
        } else {
            render_html(map).map_err(|e| CliError::io(format!("Failed to render map: {e}")))
        }
    }
}
