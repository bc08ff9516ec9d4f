//! Map assembly service.
//!
//! Collects the configured catalog files and every user-created list into
//! location groups and hands them to the composer.

use std::path::PathBuf;
use tracing::warn;

use crate::config::Config;
use crate::map::{ComposedMap, LocationGroup, MapComposer, MapView};
use crate::models::Location;
use crate::parser::{load_locations, LoadError};

use super::user_store::UserStore;

/// Inputs for one map build.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRequest {
    /// Catalog CSV files, one overlay each, in order
    pub catalog_files: Vec<PathBuf>,
    /// Delimiter used by the catalog files
    pub delimiter: char,
    /// Whether user-created lists become overlays
    pub include_user_lists: bool,
    /// Initial view
    pub view: MapView,
}

impl MapRequest {
    /// Request described by the configuration: all configured catalogs plus
    /// user lists.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            catalog_files: config.catalog.files.clone(),
            delimiter: config.catalog.delimiter,
            include_user_lists: true,
            view: config.map_view(),
        }
    }
}

/// Catalog locations merged from several files.
#[derive(Debug, Default)]
pub struct MergedCatalog {
    /// Valid locations in file order
    pub locations: Vec<Location>,
    /// Files that could not be used
    pub errors: Vec<LoadError>,
}

/// Service for building maps from configuration and stored lists.
pub struct MapService;

impl MapService {
    /// Builds the location groups for a request.
    ///
    /// # Arguments
    ///
    /// * `request` - Catalog files, delimiter and user-list switch
    /// * `store` - User store providing the created lists
    ///
    /// # Returns
    ///
    /// Catalog groups (named by file stem) followed by one
    /// `User List: <name>` group per created list, in list-name order.
    #[must_use]
    pub fn groups(request: &MapRequest, store: Option<&UserStore>) -> Vec<LocationGroup> {
        let mut groups: Vec<LocationGroup> = request
            .catalog_files
            .iter()
            .map(|path| LocationGroup::csv(path.clone(), request.delimiter))
            .collect();

        if request.include_user_lists {
            if let Some(store) = store {
                groups.extend(
                    store
                        .all_created_lists()
                        .into_values()
                        .map(|list| LocationGroup::user_list(&list.name, list.locations)),
                );
            }
        }

        groups
    }

    /// Builds and composes a map.
    #[must_use]
    pub fn build(request: &MapRequest, store: Option<&UserStore>) -> ComposedMap {
        let groups = Self::groups(request, store);
        MapComposer::new(request.view).compose(&groups)
    }

    /// Builds the map described by the configuration.
    #[must_use]
    pub fn build_map(config: &Config, store: &UserStore) -> ComposedMap {
        Self::build(&MapRequest::from_config(config), Some(store))
    }

    /// Loads and merges the valid locations of several catalog files.
    ///
    /// Files that fail to load are reported in [`MergedCatalog::errors`] and
    /// skipped.
    #[must_use]
    pub fn load_catalog(files: &[PathBuf], delimiter: char) -> MergedCatalog {
        let mut merged = MergedCatalog::default();

        for path in files {
            match load_locations(path, delimiter) {
                Ok(report) => merged.locations.extend(report.locations),
                Err(err) => {
                    warn!(path = %path.display(), "{err}");
                    merged.errors.push(err);
                }
            }
        }

        merged
    }
}
