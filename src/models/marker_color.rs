//! Category-to-color lookup for map markers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Category;

/// Color token attached to a marker.
///
/// The table is static for the lifetime of the process: one color per known
/// category and [`MarkerColor::Gray`] for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    /// Nightclubs
    Red,
    /// Bars
    Blue,
    /// Restaurants
    Green,
    /// Fallback
    Gray,
}

impl MarkerColor {
    /// Looks up the marker color for a category.
    ///
    /// # Examples
    ///
    /// ```
    /// use spoton::models::{Category, MarkerColor};
    ///
    /// assert_eq!(MarkerColor::for_category(Category::Nightclub), MarkerColor::Red);
    /// assert_eq!(MarkerColor::for_category(Category::Unknown), MarkerColor::Gray);
    /// ```
    #[must_use]
    pub const fn for_category(category: Category) -> Self {
        match category {
            Category::Nightclub => Self::Red,
            Category::Bar => Self::Blue,
            Category::Restaurant => Self::Green,
            Category::Unknown => Self::Gray,
        }
    }

    /// Token name ("red", "blue", ...).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Gray => "gray",
        }
    }

    /// Hex value used by renderers (#RRGGBB).
    #[must_use]
    pub const fn hex(&self) -> &'static str {
        match self {
            Self::Red => "#D63E2A",
            Self::Blue => "#38AADD",
            Self::Green => "#72B026",
            Self::Gray => "#575757",
        }
    }
}

impl fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
