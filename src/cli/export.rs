//! Export commands for liked and saved list snapshots.

use crate::cli::common::{CliContext, CliError, CliResult, Credentials};
use crate::constants::{LIKED_EXPORT_FILE, SAVED_EXPORT_FILE};
use crate::export;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

/// Export your liked or saved lists to CSV
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(subcommand)]
    command: ExportCommand,
}

#[derive(Subcommand, Debug)]
enum ExportCommand {
    /// Export the locations of every liked list (Name,Type)
    Liked(SnapshotArgs),
    /// Export the locations of every saved list (List Name,Name,Type)
    Saved(SnapshotArgs),
}

/// Snapshot export options
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    #[command(flatten)]
    credentials: Credentials,

    /// Output path (defaults to a file in the data directory)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        match &self.command {
            ExportCommand::Liked(args) => args.liked(ctx),
            ExportCommand::Saved(args) => args.saved(ctx),
        }
    }
}

impl SnapshotArgs {
    fn liked(&self, ctx: &CliContext) -> CliResult<()> {
        let store = ctx.open_store()?;
        let session = self.credentials.login(&store)?;
        let liked = store.liked_lists(&session)?;

        let path = self.output_path(ctx, LIKED_EXPORT_FILE)?;
        let written = export::write_liked_locations(&path, &liked)
            .map_err(|e| CliError::io(format!("Failed to export liked locations: {e:#}")))?;

        report(written.as_deref(), &path, "liked lists");
        Ok(())
    }

    fn saved(&self, ctx: &CliContext) -> CliResult<()> {
        let store = ctx.open_store()?;
        let session = self.credentials.login(&store)?;
        let saved = store.saved_lists(&session)?;

        let path = self.output_path(ctx, SAVED_EXPORT_FILE)?;
        let written = export::write_saved_lists(&path, &saved)
            .map_err(|e| CliError::io(format!("Failed to export saved lists: {e:#}")))?;

        report(written.as_deref(), &path, "saved lists");
        Ok(())
    }

    /// Get the output file path (either user-specified or in the data directory)
    fn output_path(&self, ctx: &CliContext, default_name: &str) -> CliResult<PathBuf> {
        if let Some(ref path) = self.output {
            return Ok(path.clone());
        }

        std::fs::create_dir_all(&ctx.data_dir).map_err(|e| {
            CliError::io(format!(
                "Failed to create data directory {}: {e}",
                ctx.data_dir.display()
            ))
        })?;
        Ok(ctx.data_dir.join(default_name))
    }
}

fn report(written: Option<&Path>, path: &Path, what: &str) {
    match written {
        Some(path) => println!("Exported {what} to: {}", path.display()),
        None => println!("No {what} to export ({} not written)", path.display()),
    }
}
