//! Map composition from named location groups.
//!
//! Every group becomes one togglable overlay. Groups are composed
//! independently: a group whose source cannot be loaded (or that holds no
//! location) is left out and reported as a [`Diagnostic`], never as an error
//! for the whole map.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::constants::{DEFAULT_CENTER, DEFAULT_ZOOM, USER_LIST_LAYER_PREFIX};
use crate::models::{Location, MarkerColor};
use crate::parser::catalog::{self, LoadError};

/// Initial viewport of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    /// Center as `[latitude, longitude]`
    pub center: [f64; 2],
    /// Leaflet zoom level
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: [DEFAULT_CENTER.0, DEFAULT_CENTER.1],
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Where a group's locations come from.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupSource {
    /// A catalog file, loaded while composing
    Csv {
        /// Catalog path
        path: PathBuf,
        /// Field delimiter
        delimiter: char,
    },
    /// Locations already in memory (user-created lists)
    Locations(Vec<Location>),
}

/// A named input to the composer.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationGroup {
    /// Overlay name
    pub name: String,
    /// Location source
    pub source: GroupSource,
}

impl LocationGroup {
    /// Creates a group with an explicit name.
    #[must_use]
    pub fn new(name: impl Into<String>, source: GroupSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    /// Creates a catalog-backed group named after the file's base name.
    ///
    /// # Examples
    ///
    /// ```
    /// use spoton::map::LocationGroup;
    ///
    /// let group = LocationGroup::csv("data/StGallen_Locations.csv", ',');
    /// assert_eq!(group.name, "StGallen_Locations");
    /// ```
    #[must_use]
    pub fn csv(path: impl Into<PathBuf>, delimiter: char) -> Self {
        let path = path.into();
        let name = layer_name_for_path(&path);
        Self::new(name, GroupSource::Csv { path, delimiter })
    }

    /// Creates a group for a user-created list (`"User List: <name>"`).
    #[must_use]
    pub fn user_list(list_name: &str, locations: Vec<Location>) -> Self {
        Self::new(
            format!("{USER_LIST_LAYER_PREFIX}{list_name}"),
            GroupSource::Locations(locations),
        )
    }
}

/// Derives a layer name from a catalog path (file name without extension).
#[must_use]
pub fn layer_name_for_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// A single map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Popup text (`"<name> (<category>)"`)
    pub label: String,
    /// Marker color token
    pub color: MarkerColor,
    /// The location this marker was built from
    pub location: Location,
}

impl Marker {
    /// Builds the marker for a location.
    #[must_use]
    pub fn for_location(location: &Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            label: location.label(),
            color: location.category.marker_color(),
            location: location.clone(),
        }
    }
}

/// A togglable grouping of markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    /// Overlay name shown in the layer toggle
    pub name: String,
    /// Markers in source order
    pub markers: Vec<Marker>,
    /// Rows of the source that were dropped as malformed
    pub skipped_rows: usize,
}

/// Control letting a viewer show or hide each overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerToggle {
    /// Overlay names in attachment order
    pub layers: Vec<String>,
}

/// Why a group was left out of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Catalog path does not exist
    FileNotFound,
    /// Catalog could not be opened or its header read
    Unreadable,
    /// Required columns are missing
    SchemaError,
    /// The source produced no valid location
    EmptySource,
}

impl From<&LoadError> for DiagnosticKind {
    fn from(err: &LoadError) -> Self {
        match err {
            LoadError::FileNotFound { .. } => Self::FileNotFound,
            LoadError::Unreadable { .. } => Self::Unreadable,
            LoadError::SchemaError { .. } => Self::SchemaError,
            LoadError::EmptySource { .. } => Self::EmptySource,
        }
    }
}

/// A non-fatal problem reported while composing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Group the problem belongs to
    pub group: String,
    /// Problem classification
    pub kind: DiagnosticKind,
    /// Human-readable message
    pub message: String,
}

/// Finished map handed to a rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedMap {
    /// Initial viewport
    pub view: MapView,
    /// Attached overlays, in group order
    pub overlays: Vec<Overlay>,
    /// Layer toggle control (added once all overlays are attached)
    pub layer_toggle: Option<LayerToggle>,
    /// Groups that were left out, with reasons
    pub diagnostics: Vec<Diagnostic>,
}

impl ComposedMap {
    /// Total number of markers across all overlays.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.overlays.iter().map(|o| o.markers.len()).sum()
    }

    /// Looks up an overlay by name.
    #[must_use]
    pub fn overlay(&self, name: &str) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.name == name)
    }
}

/// Builds maps for a fixed view.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapComposer {
    view: MapView,
}

impl MapComposer {
    /// Creates a composer for the given view.
    #[must_use]
    pub const fn new(view: MapView) -> Self {
        Self { view }
    }

    /// Composes a map with one overlay per non-empty group.
    ///
    /// Groups are processed in order. Catalog groups are loaded here; load
    /// failures become diagnostics and the group is omitted. The layer
    /// toggle is added after every overlay has been attached.
    pub fn compose(&self, groups: &[LocationGroup]) -> ComposedMap {
        let mut overlays = Vec::new();
        let mut diagnostics = Vec::new();

        for group in groups {
            match Self::build_overlay(group) {
                Ok(mut overlay) => {
                    overlay.name = unique_layer_name(&overlay.name, &overlays);
                    debug!(
                        layer = %overlay.name,
                        markers = overlay.markers.len(),
                        skipped = overlay.skipped_rows,
                        "Attached overlay"
                    );
                    overlays.push(overlay);
                }
                Err(diagnostic) => {
                    warn!(layer = %diagnostic.group, "{}", diagnostic.message);
                    diagnostics.push(diagnostic);
                }
            }
        }

        let layer_toggle = Some(LayerToggle {
            layers: overlays.iter().map(|o| o.name.clone()).collect(),
        });

        ComposedMap {
            view: self.view,
            overlays,
            layer_toggle,
            diagnostics,
        }
    }

    fn build_overlay(group: &LocationGroup) -> Result<Overlay, Diagnostic> {
        let (markers, skipped_rows) = match &group.source {
            GroupSource::Csv { path, delimiter } => {
                let report = catalog::load_locations(path, *delimiter).map_err(|e| Diagnostic {
                    group: group.name.clone(),
                    kind: DiagnosticKind::from(&e),
                    message: e.to_string(),
                })?;
                let markers = report.locations.iter().map(Marker::for_location).collect();
                (markers, report.skipped_rows)
            }
            GroupSource::Locations(locations) => {
                let markers: Vec<Marker> = locations.iter().map(Marker::for_location).collect();
                (markers, 0)
            }
        };

        if markers.is_empty() {
            return Err(Diagnostic {
                group: group.name.clone(),
                kind: DiagnosticKind::EmptySource,
                message: format!("No valid data in group: {}", group.name),
            });
        }

        Ok(Overlay {
            name: group.name.clone(),
            markers,
            skipped_rows,
        })
    }
}

/// Returns `name`, or `name (2)`, `name (3)`, ... if an overlay already uses it.
fn unique_layer_name(name: &str, overlays: &[Overlay]) -> String {
    let taken = |candidate: &str| overlays.iter().any(|o| o.name == candidate);
    if !taken(name) {
        return name.to_string();
    }
    (2..)
        .map(|n| format!("{name} ({n})"))
        .find(|candidate| !taken(candidate.as_str()))
        .unwrap_or_else(|| name.to_string())
}

/// Composes a map with the default view.
pub fn compose_map(groups: &[LocationGroup]) -> ComposedMap {
    MapComposer::default().compose(groups)
}
