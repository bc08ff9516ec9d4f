//! Venue categories and their fixed marker colors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::MarkerColor;

/// Venue category of a location.
///
/// Catalogs only know three venue kinds. Anything else, including an empty
/// or missing `Type` cell, maps to [`Category::Unknown`] so the row still
/// renders (with the fallback marker color).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Category {
    /// Dance club
    Nightclub,
    /// Bar or pub
    Bar,
    /// Restaurant
    Restaurant,
    /// Anything not recognized
    #[default]
    Unknown,
}

impl Category {
    /// All recognized categories, in display order.
    pub const KNOWN: [Self; 3] = [Self::Nightclub, Self::Bar, Self::Restaurant];

    /// Parses a category label leniently.
    ///
    /// Surrounding whitespace is ignored; the label itself must match exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use spoton::models::Category;
    ///
    /// assert_eq!(Category::from_label(" Bar "), Category::Bar);
    /// assert_eq!(Category::from_label("Cafe"), Category::Unknown);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Nightclub" => Self::Nightclub,
            "Bar" => Self::Bar,
            "Restaurant" => Self::Restaurant,
            _ => Self::Unknown,
        }
    }

    /// Returns the canonical label as written in catalogs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nightclub => "Nightclub",
            Self::Bar => "Bar",
            Self::Restaurant => "Restaurant",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns the marker color for this category.
    #[must_use]
    pub const fn marker_color(&self) -> MarkerColor {
        MarkerColor::for_category(*self)
    }

    /// Returns the emoji used when listing spots.
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Nightclub => "🕺",
            Self::Bar => "🍸",
            Self::Restaurant => "🍴",
            Self::Unknown => "❓",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_known() {
        assert_eq!(Category::from_label("Nightclub"), Category::Nightclub);
        assert_eq!(Category::from_label("Bar"), Category::Bar);
        assert_eq!(Category::from_label("Restaurant"), Category::Restaurant);
    }

    #[test]
    fn test_from_label_trims_whitespace() {
        assert_eq!(Category::from_label("  Restaurant\t"), Category::Restaurant);
    }

    #[test]
    fn test_from_label_unknown() {
        assert_eq!(Category::from_label(""), Category::Unknown);
        assert_eq!(Category::from_label("bar"), Category::Unknown); // case-sensitive
        assert_eq!(Category::from_label("Cafe"), Category::Unknown);
    }

    #[test]
    fn test_display_roundtrip() {
        for category in Category::KNOWN {
            assert_eq!(Category::from_label(&category.to_string()), category);
        }
        assert_eq!(Category::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_emoji() {
        assert_eq!(Category::Nightclub.emoji(), "🕺");
        assert_eq!(Category::Unknown.emoji(), "❓");
    }
}
