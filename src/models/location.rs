//! Points of interest and list selections.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Category;

/// A single point of interest.
///
/// # Validation
///
/// - latitude and longitude are finite (enforced by the catalog loader)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Venue name
    pub name: String,
    /// Venue category
    #[serde(default)]
    pub category: Category,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(name: impl Into<String>, category: Category, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            category,
            latitude,
            longitude,
        }
    }

    /// Marker/popup label, e.g. `"Club X (Nightclub)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.category)
    }

    /// Returns true if this location matches a selection by name and category.
    #[must_use]
    pub fn matches(&self, selection: &Selection) -> bool {
        self.name == selection.name && self.category == selection.category
    }
}

/// A reference to a catalog location by name and category.
///
/// Lists are built from selections; coordinates are resolved against the
/// catalog when the list is created or edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Venue name
    pub name: String,
    /// Venue category
    pub category: Category,
}

impl Selection {
    /// Creates a new selection.
    #[must_use]
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    /// Parses a `"<name> (<Type>)"` label as produced by [`Location::label`].
    ///
    /// A label without a trailing parenthesized type selects the name with
    /// an unknown category.
    ///
    /// # Examples
    ///
    /// ```
    /// use spoton::models::{Category, Selection};
    ///
    /// let sel = Selection::parse_label("Club X (Nightclub)").unwrap();
    /// assert_eq!(sel.name, "Club X");
    /// assert_eq!(sel.category, Category::Nightclub);
    /// ```
    pub fn parse_label(label: &str) -> Result<Self> {
        let label_regex = Regex::new(r"^\s*(.*?)\s*\(([^()]*)\)\s*$")
            .context("Failed to create selection label regex")?;

        let label = label.trim();
        if label.is_empty() {
            anyhow::bail!("Selection label cannot be empty");
        }

        match label_regex.captures(label) {
            Some(caps) => {
                let name = caps.get(1).map_or("", |m| m.as_str());
                if name.is_empty() {
                    anyhow::bail!("Selection label '{label}' has no venue name");
                }
                let category = Category::from_label(caps.get(2).map_or("", |m| m.as_str()));
                Ok(Self::new(name, category))
            }
            None => Ok(Self::new(label, Category::Unknown)),
        }
    }
}
