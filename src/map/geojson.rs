//! GeoJSON rendering of a composed map.

use serde::{Deserialize, Serialize};

use super::ComposedMap;

/// GeoJSON point geometry. Coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A single position
    Point {
        /// `[lon, lat]`
        coordinates: [f64; 2],
    },
}

/// Properties attached to each marker feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerProperties {
    /// Overlay the marker belongs to
    pub layer: String,
    /// Venue name
    pub name: String,
    /// Venue category label
    pub category: String,
    /// Marker color token
    pub color: String,
    /// Marker color as #RRGGBB
    pub color_hex: String,
    /// Popup text
    pub label: String,
}

/// GeoJSON objects produced by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Entity {
    /// One marker
    Feature {
        /// Marker properties
        properties: MarkerProperties,
        /// Marker position
        geometry: Geometry,
    },
    /// All markers of the map
    FeatureCollection {
        /// Features in overlay order
        features: Vec<Entity>,
    },
}

/// Converts a composed map into a `FeatureCollection`, one point per marker.
pub fn to_geojson(map: &ComposedMap) -> Entity {
    let features = map
        .overlays
        .iter()
        .flat_map(|overlay| {
            overlay.markers.iter().map(move |marker| Entity::Feature {
                properties: MarkerProperties {
                    layer: overlay.name.clone(),
                    name: marker.location.name.clone(),
                    category: marker.location.category.to_string(),
                    color: marker.color.to_string(),
                    color_hex: marker.color.hex().to_string(),
                    label: marker.label.clone(),
                },
                geometry: Geometry::Point {
                    coordinates: [marker.longitude, marker.latitude],
                },
            })
        })
        .collect();

    Entity::FeatureCollection { features }
}
