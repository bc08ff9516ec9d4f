//! Map composition and rendering.
//!
//! [`composer`] turns named location groups into a [`ComposedMap`]; the
//! renderers hand that map to a display surface, either as a standalone
//! Leaflet page ([`html`]) or as a GeoJSON document ([`geojson`]).

pub mod composer;
pub mod geojson;
pub mod html;

pub use composer::{
    compose_map, ComposedMap, Diagnostic, DiagnosticKind, GroupSource, LayerToggle,
    LocationGroup, MapComposer, MapView, Marker, Overlay,
};
pub use geojson::to_geojson;
pub use html::render_html;
