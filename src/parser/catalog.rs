//! CSV catalog loader.
//!
//! Reads a delimited venue catalog with (at least) the columns `Name`,
//! `Coordinates` and `Type`, where `Coordinates` holds `"<lat>,<lon>"` in a
//! single field. Malformed rows are skipped; only source-level problems
//! (missing file, unreadable file, missing columns, no valid rows) are
//! reported to the caller.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::{Category, Location};

/// Columns every catalog must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Name", "Coordinates", "Type"];

/// Source-level failure while loading a catalog.
///
/// None of these are fatal to a map build; the composer turns them into
/// diagnostics and omits the affected layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The path does not exist.
    FileNotFound {
        /// Catalog path
        path: PathBuf,
    },
    /// The file exists but could not be opened or its header could not be read.
    Unreadable {
        /// Catalog path
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },
    /// One or more required columns are absent from the header.
    SchemaError {
        /// Catalog path
        path: PathBuf,
        /// Required columns that were not found
        missing: Vec<String>,
    },
    /// The file is well-formed but yielded no valid location.
    EmptySource {
        /// Catalog path
        path: PathBuf,
        /// Rows dropped because of malformed coordinates
        skipped_rows: usize,
    },
}

impl LoadError {
    /// Path of the catalog that failed to load.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::FileNotFound { path }
            | Self::Unreadable { path, .. }
            | Self::SchemaError { path, .. }
            | Self::EmptySource { path, .. } => path,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path } => write!(f, "File not found: {}", path.display()),
            Self::Unreadable { path, reason } => {
                write!(f, "Error reading file {}: {reason}", path.display())
            }
            Self::SchemaError { path, missing } => write!(
                f,
                "CSV file {} is missing required columns: {}",
                path.display(),
                missing.join(", ")
            ),
            Self::EmptySource { path, skipped_rows } => write!(
                f,
                "No valid data in file: {} ({skipped_rows} malformed rows skipped)",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LoadError {}

/// Result of a successful catalog load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// Valid locations in file order
    pub locations: Vec<Location>,
    /// Rows dropped because their coordinates could not be parsed
    pub skipped_rows: usize,
}

/// Loads all valid locations from a catalog file.
///
/// # Arguments
///
/// * `path` - Catalog file
/// * `delimiter` - Field delimiter (single ASCII character, e.g. `,` or `;`)
///
/// # Returns
///
/// * `Ok(LoadReport)` - At least one valid location
/// * `Err(LoadError)` - Missing file, unreadable file, missing columns or no valid rows
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use spoton::parser::catalog::load_locations;
///
/// match load_locations(Path::new("final_CSV.csv"), ';') {
///     Ok(report) => println!("{} locations", report.locations.len()),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
pub fn load_locations(path: &Path, delimiter: char) -> Result<LoadReport, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    read_locations(file, delimiter, path)
}

/// Reads locations from any reader; `source` is only used for error reporting.
pub fn read_locations<R: Read>(
    reader: R,
    delimiter: char,
    source: &Path,
) -> Result<LoadReport, LoadError> {
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| LoadError::Unreadable {
            path: source.to_path_buf(),
            reason: format!("Delimiter '{delimiter}' is not a single ASCII character"),
        })?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| LoadError::Unreadable {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?
        .iter()
        .map(normalize_header)
        .collect();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let (name_idx, coords_idx, type_idx) =
        match (column("Name"), column("Coordinates"), column("Type")) {
            (Some(n), Some(c), Some(t)) => (n, c, t),
            _ => {
                let missing = REQUIRED_COLUMNS
                    .into_iter()
                    .filter(|required| column(*required).is_none())
                    .map(String::from)
                    .collect();
                return Err(LoadError::SchemaError {
                    path: source.to_path_buf(),
                    missing,
                });
            }
        };

    let mut locations = Vec::new();
    let mut skipped_rows = 0;

    for (row_idx, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                debug!(source = %source.display(), row = row_idx + 1, "Skipping undecodable row: {e}");
                skipped_rows += 1;
                continue;
            }
        };

        let Some((latitude, longitude)) = record.get(coords_idx).and_then(parse_coordinates)
        else {
            debug!(
                source = %source.display(),
                row = row_idx + 1,
                coordinates = record.get(coords_idx).unwrap_or(""),
                "Skipping row with malformed coordinates"
            );
            skipped_rows += 1;
            continue;
        };

        let name = record.get(name_idx).unwrap_or("").trim();
        let category = record
            .get(type_idx)
            .map_or(Category::Unknown, Category::from_label);

        locations.push(Location::new(name, category, latitude, longitude));
    }

    if locations.is_empty() {
        return Err(LoadError::EmptySource {
            path: source.to_path_buf(),
            skipped_rows,
        });
    }

    Ok(LoadReport {
        locations,
        skipped_rows,
    })
}

/// Parses a combined `"<lat>,<lon>"` coordinate field.
///
/// Surrounding whitespace is stripped first, then every double quote is
/// removed, then the field is split on commas. Exactly two components are
/// required and both must parse as finite numbers.
///
/// # Examples
///
/// ```
/// use spoton::parser::catalog::parse_coordinates;
///
/// assert_eq!(parse_coordinates("47.4245, 9.3767"), Some((47.4245, 9.3767)));
/// assert_eq!(parse_coordinates(" \"47.4245,9.3767\" "), Some((47.4245, 9.3767)));
/// assert_eq!(parse_coordinates("not-a-number,9.37"), None);
/// ```
#[must_use]
pub fn parse_coordinates(raw: &str) -> Option<(f64, f64)> {
    let cleaned = raw.trim().replace('"', "");
    let mut parts = cleaned.split(',');

    let lat = parts.next()?;
    let lon = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let lat = parse_component(lat)?;
    let lon = parse_component(lon)?;
    Some((lat, lon))
}

fn parse_component(part: &str) -> Option<f64> {
    part.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Trims whitespace and a leading byte-order mark from a header cell.
fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_string()
}
