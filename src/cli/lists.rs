//! User-created list CLI commands.

use crate::cli::common::{
    parse_delimiter, print_json, CliContext, CliError, CliResult, Credentials,
};
use crate::models::{ListView, Location, Selection};
use crate::services::{ListOutcome, MapService};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// List commands
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(subcommand)]
    command: ListCommand,
}

#[derive(Subcommand, Debug)]
enum ListCommand {
    /// Create a list from catalog locations
    Create(CreateArgs),
    /// Rename a list or replace its locations
    Edit(EditArgs),
    /// Delete one of your lists
    Delete(NamedListArgs),
    /// Show a list
    Show(ShowArgs),
    /// Like a list
    Like(NamedListArgs),
    /// Remove your like from a list
    Unlike(NamedListArgs),
    /// Save a list to a CSV file
    Save(SaveArgs),
    /// Forget a saved list
    Unsave(NamedListArgs),
    /// Show all lists ranked by likes
    Leaderboard(LeaderboardArgs),
}

/// Catalog sources used to resolve selections
#[derive(Args, Debug)]
pub struct CatalogSource {
    /// Catalog CSV file (repeatable, replaces the configured catalogs)
    #[arg(long = "catalog", value_name = "FILE")]
    catalogs: Vec<PathBuf>,

    /// Catalog field delimiter
    #[arg(long, value_name = "CHAR", value_parser = parse_delimiter)]
    delimiter: Option<char>,
}

/// Create a list from catalog locations
#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    credentials: Credentials,

    /// List name
    #[arg(long)]
    name: String,

    /// Location label, e.g. "Club X (Nightclub)" (repeatable)
    #[arg(long = "location", value_name = "LABEL")]
    locations: Vec<String>,

    #[command(flatten)]
    source: CatalogSource,
}

/// Rename a list or replace its locations
#[derive(Args, Debug)]
pub struct EditArgs {
    #[command(flatten)]
    credentials: Credentials,

    /// Current list name
    name: String,

    /// New list name
    #[arg(long, value_name = "NAME")]
    rename: Option<String>,

    /// Replacement location label (repeatable; keeps current locations if omitted)
    #[arg(long = "location", value_name = "LABEL")]
    locations: Vec<String>,

    #[command(flatten)]
    source: CatalogSource,
}

/// Act on one list by name
#[derive(Args, Debug)]
pub struct NamedListArgs {
    #[command(flatten)]
    credentials: Credentials,

    /// List name
    name: String,
}

/// Show a list
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// List name
    name: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Save a list to a CSV file
#[derive(Args, Debug)]
pub struct SaveArgs {
    #[command(flatten)]
    credentials: Credentials,

    /// List name
    name: String,

    /// Directory for the CSV file (defaults to the data directory)
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

/// Show all lists ranked by likes
#[derive(Args, Debug)]
pub struct LeaderboardArgs {
    /// Show only the top N lists
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    /// Execute list subcommand
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        match &self.command {
            ListCommand::Create(args) => args.execute(ctx),
            ListCommand::Edit(args) => args.execute(ctx),
            ListCommand::Delete(args) => args.delete(ctx),
            ListCommand::Show(args) => args.execute(ctx),
            ListCommand::Like(args) => args.like(ctx),
            ListCommand::Unlike(args) => args.unlike(ctx),
            ListCommand::Save(args) => args.execute(ctx),
            ListCommand::Unsave(args) => args.unsave(ctx),
            ListCommand::Leaderboard(args) => args.execute(ctx),
        }
    }
}

impl CatalogSource {
    fn load(&self, ctx: &CliContext) -> Vec<Location> {
        let files = if self.catalogs.is_empty() {
            ctx.config.catalog.files.clone()
        } else {
            self.catalogs.clone()
        };
        let delimiter = self.delimiter.unwrap_or(ctx.config.catalog.delimiter);

        let merged = MapService::load_catalog(&files, delimiter);
        for err in &merged.errors {
            eprintln!("Warning: {err}");
        }
        merged.locations
    }
}

impl CreateArgs {
    /// Execute create command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let selections = parse_selections(&self.locations)?;
        let mut store = ctx.open_store()?;
        let session = self.credentials.login(&store)?;
        let catalog = self.source.load(ctx);

        let outcome = store.create_list(&session, &self.name, &selections, &catalog)?;
        CliContext::save_store(&store)?;

        report_unresolved(&outcome);
        println!(
            "List '{}' created with {} location(s)",
            outcome.list.name,
            outcome.list.locations.len()
        );
        Ok(())
    }
}

impl EditArgs {
    /// Execute edit command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;
        let session = self.credentials.login(&store)?;

        let (selections, catalog) = if self.locations.is_empty() {
            let current = store.list(&self.name)?.locations;
            let selections: Vec<Selection> = current
                .iter()
                .map(|location| Selection::new(location.name.clone(), location.category))
                .collect();
            (selections, current)
        } else {
            (parse_selections(&self.locations)?, self.source.load(ctx))
        };

        let new_name = self.rename.as_deref().unwrap_or(&self.name);
        let outcome = store.edit_list(&session, &self.name, new_name, &selections, &catalog)?;
        CliContext::save_store(&store)?;

        report_unresolved(&outcome);
        println!(
            "List '{}' updated ({} location(s), {} like(s))",
            outcome.list.name,
            outcome.list.locations.len(),
            outcome.list.likes
        );
        Ok(())
    }
}

impl NamedListArgs {
    fn delete(&self, ctx: &CliContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;
        let session = self.credentials.login(&store)?;

        let deleted = store.delete_list(&session, &self.name)?;
        CliContext::save_store(&store)?;

        println!("List '{}' deleted", deleted.name);
        Ok(())
    }

    fn like(&self, ctx: &CliContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;
        let session = self.credentials.login(&store)?;

        let likes = store.like_list(&session, &self.name)?;
        CliContext::save_store(&store)?;

        println!("Liked '{}' ({likes} like(s))", self.name);
        Ok(())
    }

    fn unlike(&self, ctx: &CliContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;
        let session = self.credentials.login(&store)?;

        let likes = store.unlike_list(&session, &self.name)?;
        CliContext::save_store(&store)?;

        println!("Unliked '{}' ({likes} like(s))", self.name);
        Ok(())
    }

    fn unsave(&self, ctx: &CliContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;
        let session = self.credentials.login(&store)?;

        match store.unsave_list(&session, &self.name)? {
            Some(path) => {
                CliContext::save_store(&store)?;
                println!(
                    "List '{}' removed from saved lists (file kept at {})",
                    self.name,
                    path.display()
                );
            }
            None => println!("List '{}' was not saved", self.name),
        }
        Ok(())
    }
}

impl ShowArgs {
    /// Execute show command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let store = ctx.open_store()?;
        let list = store.list(&self.name)?;

        if self.json {
            return print_json(&list);
        }

        print_list(&list);
        Ok(())
    }
}

impl SaveArgs {
    /// Execute save command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut store = ctx.open_store()?;
        let session = self.credentials.login(&store)?;

        let dir = self.dir.clone().unwrap_or_else(|| ctx.data_dir.clone());
        std::fs::create_dir_all(&dir)
            .map_err(|e| CliError::io(format!("Failed to create {}: {e}", dir.display())))?;

        let path = store.save_list(&session, &self.name, &dir)?;
        CliContext::save_store(&store)?;

        println!("List '{}' saved to {}", self.name, path.display());
        Ok(())
    }
}

impl LeaderboardArgs {
    /// Execute leaderboard command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let store = ctx.open_store()?;
        let mut lists = store.leaderboard();
        if let Some(limit) = self.limit {
            lists.truncate(limit);
        }

        if self.json {
            return print_json(&lists);
        }

        if lists.is_empty() {
            println!("No lists yet");
            return Ok(());
        }

        for (rank, list) in lists.iter().enumerate() {
            println!(
                "{:>3}. {} by {} ({} like(s), {} location(s))",
                rank + 1,
                list.name,
                list.owner,
                list.likes,
                list.locations.len()
            );
        }
        Ok(())
    }
}

fn parse_selections(labels: &[String]) -> CliResult<Vec<Selection>> {
    labels
        .iter()
        .map(|label| {
            Selection::parse_label(label).map_err(|e| CliError::validation(e.to_string()))
        })
        .collect()
}

fn report_unresolved(outcome: &ListOutcome) {
    for selection in &outcome.unresolved {
        eprintln!(
            "Warning: Location not found in catalog: {} ({})",
            selection.name, selection.category
        );
    }
}

fn print_list(list: &ListView) {
    println!("{} by {} ({} like(s))", list.name, list.owner, list.likes);
    for location in &list.locations {
        println!(
            "  {} {} ({})",
            location.category.emoji(),
            location.name,
            location.category
        );
    }
}
