//! SpotOn - venue catalogs and user lists on a layered map
//!
//! Headless command line for composing the map, inspecting catalogs and
//! managing users and their lists.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spoton::cli::{
    CatalogArgs, CliContext, ConfigArgs, ExitCode, ExportArgs, GlobalOptions, ListArgs, MapArgs,
    UserArgs,
};
#[cfg(feature = "web")]
use spoton::cli::ServeArgs;

/// SpotOn - venue catalogs and user lists on a layered map
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Data directory holding users.json, uploaded images and exports
    #[arg(long, global = true, value_name = "DIR", env = "SPOTON_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE", env = "SPOTON_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose the map and write it as HTML or GeoJSON
    Map(MapArgs),
    /// Inspect catalog files
    Catalog(CatalogArgs),
    /// Manage user accounts
    User(UserArgs),
    /// Create, like, save and rank lists
    List(ListArgs),
    /// Export liked or saved lists to CSV
    Export(ExportArgs),
    /// Show or change configuration
    Config(ConfigArgs),
    /// Serve the map over HTTP
    #[cfg(feature = "web")]
    Serve(ServeArgs),
}

fn init_tracing(verbose: bool, default_level: &str) {
    let filter = if verbose { "debug" } else { default_level };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    #[cfg(feature = "web")]
    let default_level = if matches!(cli.command, Command::Serve(_)) {
        "info"
    } else {
        "warn"
    };
    #[cfg(not(feature = "web"))]
    let default_level = "warn";

    init_tracing(cli.verbose, default_level);

    let options = GlobalOptions {
        data_dir: cli.data_dir,
        config: cli.config,
    };

    let result = CliContext::load(&options).and_then(|ctx| match &cli.command {
        Command::Map(args) => args.execute(&ctx),
        Command::Catalog(args) => args.execute(&ctx),
        Command::User(args) => args.execute(&ctx),
        Command::List(args) => args.execute(&ctx),
        Command::Export(args) => args.execute(&ctx),
        Command::Config(args) => args.execute(&ctx),
        #[cfg(feature = "web")]
        Command::Serve(args) => args.execute(&ctx),
    });

    match result {
        Ok(()) => std::process::exit(ExitCode::Success.code()),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}
