//! CLI command handlers for SpotOn.
//!
//! This module provides headless, scriptable access to the map composer,
//! the catalog loader and the user/list store.

pub mod catalog;
pub mod common;
pub mod config;
pub mod export;
pub mod lists;
pub mod map;
#[cfg(feature = "web")]
pub mod serve;
pub mod user;

// Re-export types used by main.rs and tests
pub use catalog::CatalogArgs;
pub use common::{CliContext, CliError, CliResult, ExitCode, GlobalOptions};
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use lists::ListArgs;
pub use map::MapArgs;
#[cfg(feature = "web")]
pub use serve::ServeArgs;
pub use user::UserArgs;
