//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR_NAME, DEFAULT_CENTER, DEFAULT_DELIMITER, DEFAULT_ZOOM};
use crate::map::MapView;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory holding `users.json`, uploaded images and exports.
    /// Defaults to the platform data directory when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Catalog sources shown on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog CSV files, one overlay each
    #[serde(default)]
    pub files: Vec<PathBuf>,
    /// Field delimiter used by the catalog files
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            delimiter: default_delimiter(),
        }
    }
}

/// Initial map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// `[latitude, longitude]`
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    /// Leaflet zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

fn default_center() -> [f64; 2] {
    [DEFAULT_CENTER.0, DEFAULT_CENTER.1]
}

fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/SpotOn/config.toml`
/// - macOS: `~/Library/Application Support/SpotOn/config.toml`
/// - Windows: `%APPDATA%\SpotOn\config.toml`
///
/// # Validation
///
/// - catalog delimiter must be a single ASCII character other than `"`
/// - map center must be a valid latitude/longitude pair
/// - zoom must be between 0 and 19
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Catalog sources
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Initial map view
    #[serde(default)]
    pub map: MapConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/SpotOn/`
    /// - macOS: `~/Library/Application Support/SpotOn/`
    /// - Windows: `%APPDATA%\SpotOn\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the default config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Gets the platform default data directory (`<data_dir>/SpotOn`).
    pub fn default_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .context("Failed to determine data directory")?
            .join(CONFIG_DIR_NAME);

        Ok(data_dir)
    }

    /// Resolves the effective data directory.
    ///
    /// Uses `paths.data_dir` when set, otherwise the platform default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.paths.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_data_dir(),
        }
    }

    /// Initial map view described by this configuration.
    #[must_use]
    pub fn map_view(&self) -> MapView {
        MapView {
            center: self.map.center,
            zoom: self.map.zoom,
        }
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the default config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit file.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let delimiter = self.catalog.delimiter;
        if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' {
            anyhow::bail!("Invalid catalog delimiter: {delimiter:?}");
        }

        let [lat, lon] = self.map.center;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            anyhow::bail!("Map center out of range: [{lat}, {lon}]");
        }

        if self.map.zoom > 19 {
            anyhow::bail!("Map zoom must be between 0 and 19, got {}", self.map.zoom);
        }

        Ok(())
    }

    /// Sets a configuration value by dotted key.
    ///
    /// Supported keys: `paths.data_dir`, `catalog.files` (comma-separated),
    /// `catalog.delimiter`, `map.center` (`lat,lon`), `map.zoom`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "paths.data_dir" => {
                self.paths.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "catalog.files" => {
                self.catalog.files = value
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(PathBuf::from)
                    .collect();
            }
            "catalog.delimiter" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => self.catalog.delimiter = c,
                    _ => anyhow::bail!("Delimiter must be a single character, got '{value}'"),
                }
            }
            "map.center" => {
                let (lat, lon) = crate::parser::catalog::parse_coordinates(value)
                    .with_context(|| format!("Invalid map center '{value}', expected 'lat,lon'"))?;
                self.map.center = [lat, lon];
            }
            "map.zoom" => {
                self.map.zoom = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid zoom level '{value}'"))?;
            }
            _ => anyhow::bail!(
                "Unknown config key '{key}'. Supported keys: paths.data_dir, catalog.files, catalog.delimiter, map.center, map.zoom"
            ),
        }

        self.validate()
    }
}
