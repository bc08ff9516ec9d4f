//! User accounts and the lists they create.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::Location;

/// A named list of locations created by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserList {
    /// Number of users who currently like this list
    #[serde(default)]
    pub likes: u32,
    /// Locations in the list, in selection order
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl UserList {
    /// Creates an empty-liked list from resolved locations.
    #[must_use]
    pub fn new(locations: Vec<Location>) -> Self {
        Self {
            likes: 0,
            locations,
            created_at: Utc::now(),
        }
    }
}

/// Persisted user record.
///
/// List-valued fields are stored as typed collections. Missing fields in an
/// older `users.json` fall back to empty defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique user name
    pub username: String,
    /// Hex-encoded SHA-256 of the password
    pub password_hash: String,
    /// Selected activities
    #[serde(default)]
    pub activities: Vec<String>,
    /// Free-form bio
    #[serde(default)]
    pub bio: String,
    /// Copied profile picture, if any
    #[serde(default)]
    pub profile_image: Option<PathBuf>,
    /// Liked flag per list name (lists of any user)
    #[serde(default)]
    pub liked_lists: BTreeMap<String, bool>,
    /// Saved list name -> path of the CSV written when saving
    #[serde(default)]
    pub saved_lists: BTreeMap<String, PathBuf>,
    /// Lists created by this user, keyed by list name
    #[serde(default)]
    pub created_lists: BTreeMap<String, UserList>,
    /// Registration timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Names of lists this user currently likes.
    pub fn liked_list_names(&self) -> impl Iterator<Item = &str> {
        self.liked_lists
            .iter()
            .filter(|(_, liked)| **liked)
            .map(|(name, _)| name.as_str())
    }

    /// Returns true if the user likes the given list.
    #[must_use]
    pub fn likes(&self, list_name: &str) -> bool {
        self.liked_lists.get(list_name).copied().unwrap_or(false)
    }
}

/// Read-only view of a list together with its owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    /// List name
    pub name: String,
    /// User who created the list
    pub owner: String,
    /// Current like counter
    pub likes: u32,
    /// Locations in the list
    pub locations: Vec<Location>,
}

/// Authenticated per-request context.
///
/// Obtained from `UserStore::login` and passed explicitly to every
/// operation that acts on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
}

impl Session {
    pub(crate) fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// The logged-in user.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}
