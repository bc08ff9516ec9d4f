//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name, the default map view and the
//! file names used inside the data directory.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "SpotOn";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "spoton";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "SpotOn";

/// Default map center (St. Gallen old town), as `(latitude, longitude)`.
pub const DEFAULT_CENTER: (f64, f64) = (47.4245, 9.3767);

/// Default Leaflet zoom level for the composed map.
pub const DEFAULT_ZOOM: u8 = 16;

/// Default catalog delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// File holding all user records inside the data directory.
pub const USERS_FILE: &str = "users.json";

/// Directory (inside the data directory) for copied profile pictures.
pub const UPLOAD_DIR: &str = "uploaded_images";

/// Default file name for the liked-locations snapshot.
pub const LIKED_EXPORT_FILE: &str = "liked_locations.csv";

/// Default file name for the saved-lists snapshot.
pub const SAVED_EXPORT_FILE: &str = "saved_lists.csv";

/// Prefix of overlay names built from user-created lists.
pub const USER_LIST_LAYER_PREFIX: &str = "User List: ";

/// Activities a user can pick at registration.
pub const ACTIVITIES: &[&str] = &[
    "Sightseeing",
    "Museum visits",
    "Art galleries",
    "Shopping",
    "Coffee tasting",
    "Nightlife (clubs/bars)",
    "Local food tasting",
    "Street art tours",
    "Live music events",
    "Movie nights",
    "Escape rooms",
    "Rooftop bars",
    "City park picnics",
    "Biking tours",
    "Historic tours",
    "Photography walks",
    "Yoga classes",
    "Cooking workshops",
    "Wine or craft beer tasting",
    "Theater performances",
];
