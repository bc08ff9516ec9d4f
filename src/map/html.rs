//! Standalone Leaflet page for a composed map.
//!
//! The page loads Leaflet from a CDN, embeds the map data as JSON and builds
//! one layer group per overlay plus a layer control in the browser.

use anyhow::{Context, Result};
use serde::Serialize;

use super::ComposedMap;
use crate::constants::APP_NAME;

const PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <!-- Leaflet 1.9.4 -->
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin=""></script>
  <style>
    html, body { height: 100%; margin: 0; }
    #map { position: absolute; inset: 0; }
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    const data = {{DATA}};
    const map = L.map('map').setView(data.view.center, data.view.zoom);
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
      maxZoom: 19,
      attribution: '&copy; OpenStreetMap contributors'
    }).addTo(map);

    const overlays = {};
    for (const overlay of data.overlays) {
      const group = L.layerGroup();
      for (const marker of overlay.markers) {
        L.circleMarker([marker.lat, marker.lon], {
          radius: 8,
          color: marker.color,
          fillColor: marker.color,
          fillOpacity: 0.85
        }).bindPopup(document.createTextNode(marker.label)).addTo(group);
      }
      group.addTo(map);
      overlays[overlay.name] = group;
    }

    if (data.layerToggle) {
      L.control.layers(null, overlays, { collapsed: false }).addTo(map);
    }
  </script>
</body>
</html>
"#;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageData<'a> {
    view: PageView,
    overlays: Vec<PageOverlay<'a>>,
    layer_toggle: bool,
}

#[derive(Serialize)]
struct PageView {
    center: [f64; 2],
    zoom: u8,
}

#[derive(Serialize)]
struct PageOverlay<'a> {
    /// HTML-escaped; the layer control inserts it as markup
    name: String,
    markers: Vec<PageMarker<'a>>,
}

#[derive(Serialize)]
struct PageMarker<'a> {
    lat: f64,
    lon: f64,
    label: &'a str,
    color: &'static str,
}

/// Renders a composed map as a self-contained HTML page.
///
/// # Errors
///
/// Returns an error if the map data cannot be serialized.
pub fn render_html(map: &ComposedMap) -> Result<String> {
    let data = PageData {
        view: PageView {
            center: map.view.center,
            zoom: map.view.zoom,
        },
        overlays: map
            .overlays
            .iter()
            .map(|overlay| PageOverlay {
                name: escape_html(&overlay.name),
                markers: overlay
                    .markers
                    .iter()
                    .map(|marker| PageMarker {
                        lat: marker.latitude,
                        lon: marker.longitude,
                        label: &marker.label,
                        color: marker.color.hex(),
                    })
                    .collect(),
            })
            .collect(),
        layer_toggle: map.layer_toggle.is_some(),
    };

    let json = serde_json::to_string(&data).context("Failed to serialize map data")?;

    Ok(PAGE_TEMPLATE
        .replace("{{TITLE}}", &format!("{APP_NAME} Map"))
        .replace("{{DATA}}", &escape_script_json(&json)))
}

/// Escapes text for use as HTML markup.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Makes a JSON document safe to embed inside a `<script>` element.
fn escape_script_json(json: &str) -> String {
    json.replace("</", "<\\/")
        .replace("<!--", "<\\!--")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
