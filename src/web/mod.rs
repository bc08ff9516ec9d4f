//! Web API module for SpotOn.
//!
//! Serves the composed map and read-only views of the catalog and user
//! lists. Every request composes a fresh map from the configured sources.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /map` - Rendered Leaflet page
//! - `GET /api/map` - Composed map as GeoJSON plus overlay summary and diagnostics
//! - `GET /api/locations` - Locations of every configured catalog
//! - `GET /api/lists` - All user-created lists
//! - `GET /api/lists/{name}` - A single list
//! - `GET /api/leaderboard` - Lists ranked by likes (optional ?limit=)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::map::{geojson::Entity, render_html, to_geojson, Diagnostic, MapView};
use crate::models::{ListView, Location};
use crate::services::{MapService, UserStore};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Directory holding the user store
    data_dir: PathBuf,
}

impl AppState {
    /// Creates a new application state.
    #[must_use]
    pub fn new(config: Config, data_dir: PathBuf) -> Self {
        Self {
            config: Arc::new(config),
            data_dir,
        }
    }

    /// Returns the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    fn open_store(&self) -> Result<UserStore, (StatusCode, Json<ApiError>)> {
        UserStore::open(&self.data_dir).map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::with_details(
                    "Failed to open user store",
                    format!("{e:#}"),
                )),
            )
        })
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// API version.
    pub version: String,
}

/// Summary of one overlay of the composed map.
#[derive(Debug, Serialize)]
pub struct OverlaySummary {
    /// Overlay name.
    pub name: String,
    /// Number of markers.
    pub markers: usize,
    /// Source rows dropped as malformed.
    pub skipped_rows: usize,
}

/// Composed map response.
#[derive(Debug, Serialize)]
pub struct MapResponse {
    /// Initial view.
    pub view: MapView,
    /// All markers as a GeoJSON `FeatureCollection`.
    pub geojson: Entity,
    /// Overlays in layer-toggle order.
    pub overlays: Vec<OverlaySummary>,
    /// Groups left off the map.
    pub diagnostics: Vec<Diagnostic>,
}

/// Catalog locations response.
#[derive(Debug, Serialize)]
pub struct LocationListResponse {
    /// Valid locations of every configured catalog.
    pub locations: Vec<Location>,
    /// Number of locations.
    pub count: usize,
    /// Catalog files that could not be used.
    pub errors: Vec<String>,
}

/// User list response.
#[derive(Debug, Serialize)]
pub struct ListListResponse {
    /// Lists in name order (or rank order for the leaderboard).
    pub lists: Vec<ListView>,
}

/// Query parameters for the leaderboard.
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// Maximum number of entries.
    pub limit: Option<usize>,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Runs store and catalog I/O off the async workers.
async fn blocking<T, F>(task: F) -> Result<T, (StatusCode, Json<ApiError>)>
where
    F: FnOnce() -> Result<T, (StatusCode, Json<ApiError>)> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details("Request task failed", e.to_string())),
        )
    })?
}

/// GET /map - Rendered Leaflet page.
async fn map_page(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, Json<ApiError>)> {
    blocking(move || {
        let store = state.open_store()?;
        let map = MapService::build_map(&state.config, &store);

        render_html(&map).map(Html).map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::with_details("Failed to render map", e.to_string())),
            )
        })
    })
    .await
}

/// GET /api/map - Composed map data.
async fn map_data(
    State(state): State<AppState>,
) -> Result<Json<MapResponse>, (StatusCode, Json<ApiError>)> {
    blocking(move || {
        let store = state.open_store()?;
        let map = MapService::build_map(&state.config, &store);

        Ok(Json(MapResponse {
            view: map.view,
            geojson: to_geojson(&map),
            overlays: map
                .overlays
                .iter()
                .map(|overlay| OverlaySummary {
                    name: overlay.name.clone(),
                    markers: overlay.markers.len(),
                    skipped_rows: overlay.skipped_rows,
                })
                .collect(),
            diagnostics: map.diagnostics,
        }))
    })
    .await
}

/// GET /api/locations - Catalog locations.
async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<LocationListResponse>, (StatusCode, Json<ApiError>)> {
    blocking(move || {
        let merged =
            MapService::load_catalog(&state.config.catalog.files, state.config.catalog.delimiter);

        Ok(Json(LocationListResponse {
            count: merged.locations.len(),
            locations: merged.locations,
            errors: merged.errors.iter().map(ToString::to_string).collect(),
        }))
    })
    .await
}

/// GET /api/lists - All user-created lists.
async fn list_lists(
    State(state): State<AppState>,
) -> Result<Json<ListListResponse>, (StatusCode, Json<ApiError>)> {
    blocking(move || {
        let store = state.open_store()?;
        let lists = store.all_created_lists().into_values().collect();
        Ok(Json(ListListResponse { lists }))
    })
    .await
}

/// GET /api/lists/{name} - A single list.
async fn get_list(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ListView>, (StatusCode, Json<ApiError>)> {
    blocking(move || {
        let store = state.open_store()?;
        let list = store
            .list(&name)
            .map_err(|e| (StatusCode::NOT_FOUND, Json(ApiError::new(e.to_string()))))?;
        Ok(Json(list))
    })
    .await
}

/// GET /api/leaderboard - Lists ranked by likes.
async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<ListListResponse>, (StatusCode, Json<ApiError>)> {
    blocking(move || {
        let store = state.open_store()?;
        let mut lists = store.leaderboard();
        if let Some(limit) = query.limit {
            lists.truncate(limit);
        }
        Ok(Json(ListListResponse { lists }))
    })
    .await
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // Read-only API meant to run next to a local frontend.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/map", get(map_page))
        .route("/api/map", get(map_data))
        .route("/api/locations", get(list_locations))
        .route("/api/lists", get(list_lists))
        .route("/api/lists/{name}", get(get_list))
        .route("/api/leaderboard", get(leaderboard))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `data_dir` - Directory holding the user store
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: Config, data_dir: PathBuf, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(config, data_dir);
    let app = create_router(state);

    info!("Starting SpotOn web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
