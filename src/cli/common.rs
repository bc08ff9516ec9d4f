//! Shared CLI plumbing: error type, exit codes and per-invocation context.

use std::fmt;
use std::path::PathBuf;

use clap::Args;

use crate::config::Config;
use crate::models::Session;
use crate::parser::LoadError;
use crate::services::{ListError, UserError, UserStore};

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Invalid input or rejected operation
    ValidationError = 1,
    /// File missing or unreadable/unwritable
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub kind: ExitCode,
    /// Message printed after `Error: `
    pub message: String,
}

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// I/O or not-found failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<UserError> for CliError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UserNotFound(_) => Self::io(err.to_string()),
            _ => Self::validation(err.to_string()),
        }
    }
}

impl From<ListError> for CliError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::ListNotFound(_) => Self::io(err.to_string()),
            ListError::User(user_err) => user_err.into(),
            _ => Self::validation(err.to_string()),
        }
    }
}

impl From<LoadError> for CliError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::SchemaError { .. } | LoadError::EmptySource { .. } => {
                Self::validation(err.to_string())
            }
            _ => Self::io(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(list_err) = err.downcast_ref::<ListError>() {
            return list_err.clone().into();
        }
        if let Some(user_err) = err.downcast_ref::<UserError>() {
            return user_err.clone().into();
        }
        Self::io(format!("{err:#}"))
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Data directory override
    pub data_dir: Option<PathBuf>,
    /// Config file override
    pub config: Option<PathBuf>,
}

/// Resolved per-invocation context.
#[derive(Debug)]
pub struct CliContext {
    /// Loaded configuration
    pub config: Config,
    /// Config file in use
    pub config_path: PathBuf,
    /// Effective data directory
    pub data_dir: PathBuf,
}

impl CliContext {
    /// Loads configuration and resolves the data directory.
    pub fn load(options: &GlobalOptions) -> CliResult<Self> {
        let config_path = match &options.config {
            Some(path) => path.clone(),
            None => Config::config_file_path()
                .map_err(|e| CliError::io(format!("Failed to locate configuration: {e}")))?,
        };

        let config = Config::load_from(&config_path)
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let data_dir = match &options.data_dir {
            Some(dir) => dir.clone(),
            None => config
                .data_dir()
                .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e}")))?,
        };

        Ok(Self {
            config,
            config_path,
            data_dir,
        })
    }

    /// Opens the user store in the data directory.
    pub fn open_store(&self) -> CliResult<UserStore> {
        UserStore::open(&self.data_dir)
            .map_err(|e| CliError::io(format!("Failed to open user store: {e:#}")))
    }

    /// Writes the user store back to disk.
    pub fn save_store(store: &UserStore) -> CliResult<()> {
        store
            .save()
            .map_err(|e| CliError::io(format!("Failed to save user store: {e:#}")))
    }
}

/// Login arguments for commands acting on behalf of a user.
#[derive(Args, Debug, Clone)]
pub struct Credentials {
    /// Username
    #[arg(long, short = 'u', value_name = "NAME")]
    pub user: String,

    /// Password
    #[arg(long, env = "SPOTON_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl Credentials {
    /// Authenticates against the store.
    pub fn login(&self, store: &UserStore) -> CliResult<Session> {
        store
            .login(&self.user, &self.password)
            .map_err(CliError::from)
    }
}

/// Parses a single-character delimiter argument.
pub fn parse_delimiter(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && c != '"' => Ok(c),
        _ => Err(format!(
            "delimiter must be a single ASCII character, got '{value}'"
        )),
    }
}

/// Prints a value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
