//! File-backed user store.
//!
//! All user records live in a single JSON document (`users.json`) inside the
//! data directory. The whole document is loaded on open and written back with
//! a temp file + rename on [`UserStore::save`]. One writer at a time is
//! assumed.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::{ACTIVITIES, UPLOAD_DIR, USERS_FILE};
use crate::models::{ListView, Session, UserRecord};

/// Account-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// Username is empty
    EmptyUsername,
    /// Password is empty
    EmptyPassword,
    /// No activity selected
    NoActivities,
    /// Activity is not one of the known activities
    UnknownActivity(String),
    /// Username already registered
    UsernameTaken(String),
    /// No such user
    UserNotFound(String),
    /// Username/password mismatch
    InvalidCredentials,
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => f.write_str("Username cannot be empty"),
            Self::EmptyPassword => f.write_str("Password cannot be empty"),
            Self::NoActivities => f.write_str("Select at least one activity"),
            Self::UnknownActivity(activity) => write!(f, "Unknown activity: '{activity}'"),
            Self::UsernameTaken(name) => {
                write!(f, "Username '{name}' already exists. Please choose another.")
            }
            Self::UserNotFound(name) => write!(f, "User '{name}' not found"),
            Self::InvalidCredentials => f.write_str("Invalid credentials"),
        }
    }
}

impl std::error::Error for UserError {}

/// Registration request.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    /// Desired username
    pub username: String,
    /// Plain-text password (hashed before storing)
    pub password: String,
    /// Selected activities (at least one)
    pub activities: Vec<String>,
    /// Optional bio
    pub bio: String,
    /// Profile picture already imported into the data directory
    pub profile_image: Option<PathBuf>,
}

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New username
    pub username: Option<String>,
    /// New plain-text password
    pub password: Option<String>,
    /// New bio
    pub bio: Option<String>,
    /// New profile picture (already imported)
    pub profile_image: Option<PathBuf>,
    /// New activity selection
    pub activities: Option<Vec<String>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    users: BTreeMap<String, UserRecord>,
}

/// Persistent collection of user records.
#[derive(Debug)]
pub struct UserStore {
    data_dir: PathBuf,
    pub(crate) users: BTreeMap<String, UserRecord>,
}

impl UserStore {
    /// Opens the store in `data_dir`. A missing `users.json` yields an empty store.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(USERS_FILE);

        let users = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read user store: {}", path.display()))?;
            let document: StoreDocument = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse user store: {}", path.display()))?;
            document.users
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), users = users.len(), "Opened user store");

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            users,
        })
    }

    /// Data directory backing this store.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Writes the store back to disk atomically.
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("Failed to create data directory: {}", self.data_dir.display())
        })?;

        let document = StoreDocument {
            users: self.users.clone(),
        };
        let content =
            serde_json::to_string_pretty(&document).context("Failed to serialize user store")?;

        let path = self.data_dir.join(USERS_FILE);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp store file: {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to rename temp store file to: {}", path.display()))?;

        Ok(())
    }

    /// Copies a profile picture into `<data_dir>/uploaded_images/` and
    /// returns the stored path.
    pub fn import_profile_image(&self, source: &Path) -> Result<PathBuf> {
        let file_name = source
            .file_name()
            .with_context(|| format!("Invalid image path: {}", source.display()))?;

        let upload_dir = self.data_dir.join(UPLOAD_DIR);
        fs::create_dir_all(&upload_dir).with_context(|| {
            format!("Failed to create upload directory: {}", upload_dir.display())
        })?;

        let dest = upload_dir.join(file_name);
        fs::copy(source, &dest).with_context(|| {
            format!(
                "Failed to copy profile image from {} to {}",
                source.display(),
                dest.display()
            )
        })?;

        Ok(dest)
    }

    /// Registers a new user.
    pub fn register(&mut self, new_user: NewUser) -> Result<Session, UserError> {
        let username = new_user.username.trim().to_string();
        if username.is_empty() {
            return Err(UserError::EmptyUsername);
        }
        if new_user.password.is_empty() {
            return Err(UserError::EmptyPassword);
        }
        validate_activities(&new_user.activities)?;

        if self.users.contains_key(&username) {
            return Err(UserError::UsernameTaken(username));
        }

        let record = UserRecord {
            username: username.clone(),
            password_hash: hash_password(&new_user.password),
            activities: new_user.activities,
            bio: new_user.bio,
            profile_image: new_user.profile_image,
            liked_lists: BTreeMap::new(),
            saved_lists: BTreeMap::new(),
            created_lists: BTreeMap::new(),
            created_at: Utc::now(),
        };
        self.users.insert(username.clone(), record);

        info!(user = %username, "Registered user");
        Ok(Session::new(username))
    }

    /// Returns true if the username exists and the password matches.
    #[must_use]
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|record| record.password_hash == hash_password(password))
    }

    /// Authenticates and returns a session for the user.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, UserError> {
        if self.authenticate(username, password) {
            Ok(Session::new(username))
        } else {
            Err(UserError::InvalidCredentials)
        }
    }

    /// Looks up a user's record.
    #[must_use]
    pub fn profile(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    /// Applies a profile update and returns the (possibly renamed) session.
    pub fn update_profile(
        &mut self,
        session: &Session,
        update: ProfileUpdate,
    ) -> Result<Session, UserError> {
        let current = session.username().to_string();
        if !self.users.contains_key(&current) {
            return Err(UserError::UserNotFound(current));
        }

        let new_username = match update.username.as_deref().map(str::trim) {
            Some("") => return Err(UserError::EmptyUsername),
            Some(name) if name != current => {
                if self.users.contains_key(name) {
                    return Err(UserError::UsernameTaken(name.to_string()));
                }
                Some(name.to_string())
            }
            _ => None,
        };

        if let Some(activities) = &update.activities {
            validate_activities(activities)?;
        }
        if update.password.as_deref() == Some("") {
            return Err(UserError::EmptyPassword);
        }

        let Some(mut record) = self.users.remove(&current) else {
            return Err(UserError::UserNotFound(current));
        };

        if let Some(password) = update.password {
            record.password_hash = hash_password(&password);
        }
        if let Some(bio) = update.bio {
            record.bio = bio;
        }
        if let Some(image) = update.profile_image {
            record.profile_image = Some(image);
        }
        if let Some(activities) = update.activities {
            record.activities = activities;
        }

        let username = new_username.unwrap_or(current);
        record.username = username.clone();
        self.users.insert(username.clone(), record);

        Ok(Session::new(username))
    }

    /// Deletes the session's user together with the lists they created.
    ///
    /// Their likes are withdrawn and other users' liked and saved entries
    /// for the deleted lists are removed.
    pub fn delete_user(&mut self, session: &Session) -> Result<UserRecord, UserError> {
        let record = self
            .users
            .remove(session.username())
            .ok_or_else(|| UserError::UserNotFound(session.username().to_string()))?;
        self.release_user_lists(&record);

        info!(user = %record.username, "Deleted user");
        Ok(record)
    }

    /// All usernames, sorted.
    #[must_use]
    pub fn usernames(&self) -> Vec<String> {
        self.users.keys().cloned().collect()
    }

    /// Every user-created list keyed by name.
    ///
    /// Users are visited in username order; if two users own a list with the
    /// same name, the later one wins.
    #[must_use]
    pub fn all_created_lists(&self) -> BTreeMap<String, ListView> {
        let mut lists = BTreeMap::new();
        for record in self.users.values() {
            for (name, list) in &record.created_lists {
                lists.insert(
                    name.clone(),
                    ListView {
                        name: name.clone(),
                        owner: record.username.clone(),
                        likes: list.likes,
                        locations: list.locations.clone(),
                    },
                );
            }
        }
        lists
    }

    pub(crate) fn user(&self, session: &Session) -> Result<&UserRecord, UserError> {
        self.users
            .get(session.username())
            .ok_or_else(|| UserError::UserNotFound(session.username().to_string()))
    }

    pub(crate) fn user_mut(&mut self, session: &Session) -> Result<&mut UserRecord, UserError> {
        self.users
            .get_mut(session.username())
            .ok_or_else(|| UserError::UserNotFound(session.username().to_string()))
    }
}

/// Hex-encoded SHA-256 of a password.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn validate_activities(activities: &[String]) -> Result<(), UserError> {
    if activities.is_empty() {
        return Err(UserError::NoActivities);
    }
    if let Some(unknown) = activities.iter().find(|a| !ACTIVITIES.contains(&a.as_str())) {
        return Err(UserError::UnknownActivity(unknown.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Location, UserList};
    use tempfile::TempDir;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: name.to_string(),
            password: "secret".to_string(),
            activities: vec!["Sightseeing".to_string()],
            ..NewUser::default()
        }
    }

    #[test]
    fn test_hash_password() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_register_and_login() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = UserStore::open(temp_dir.path()).unwrap();

        let session = store.register(new_user("ana")).unwrap();
        assert_eq!(session.username(), "ana");

        assert!(store.authenticate("ana", "secret"));
        assert!(!store.authenticate("ana", "wrong"));
        assert!(!store.authenticate("bob", "secret"));
        assert_eq!(store.login("ana", "wrong"), Err(UserError::InvalidCredentials));
        assert!(store.login("ana", "secret").is_ok());
    }

    #[test]
    fn test_register_validation() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = UserStore::open(temp_dir.path()).unwrap();

        assert_eq!(store.register(new_user("  ")), Err(UserError::EmptyUsername));

        let mut no_password = new_user("ana");
        no_password.password.clear();
        assert_eq!(store.register(no_password), Err(UserError::EmptyPassword));

        let mut no_activities = new_user("ana");
        no_activities.activities.clear();
        assert_eq!(store.register(no_activities), Err(UserError::NoActivities));

        let mut bad_activity = new_user("ana");
        bad_activity.activities = vec!["Skydiving".to_string()];
        assert_eq!(
            store.register(bad_activity),
            Err(UserError::UnknownActivity("Skydiving".to_string()))
        );

        store.register(new_user("ana")).unwrap();
        assert_eq!(
            store.register(new_user("ana")),
            Err(UserError::UsernameTaken("ana".to_string()))
        );
    }

    #[test]
    fn test_save_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = UserStore::open(temp_dir.path()).unwrap();
        store.register(new_user("ana")).unwrap();
        store.save().unwrap();

        assert!(temp_dir.path().join(USERS_FILE).exists());
        assert!(!temp_dir.path().join("users.json.tmp").exists());

        let reopened = UserStore::open(temp_dir.path()).unwrap();
        assert_eq!(reopened.usernames(), vec!["ana".to_string()]);
        assert!(reopened.authenticate("ana", "secret"));
    }

    #[test]
    fn test_open_corrupted_store_fails() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(USERS_FILE), "{not json").unwrap();
        assert!(UserStore::open(temp_dir.path()).is_err());
    }

    #[test]
    fn test_update_profile_rename_and_password() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = UserStore::open(temp_dir.path()).unwrap();
        let session = store.register(new_user("ana")).unwrap();
        store.register(new_user("bob")).unwrap();

        let taken = store.update_profile(
            &session,
            ProfileUpdate {
                username: Some("bob".to_string()),
                ..ProfileUpdate::default()
            },
        );
        assert_eq!(taken, Err(UserError::UsernameTaken("bob".to_string())));

        let session = store
            .update_profile(
                &session,
                ProfileUpdate {
                    username: Some("anna".to_string()),
                    password: Some("new-secret".to_string()),
                    bio: Some("Hi".to_string()),
                    ..ProfileUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(session.username(), "anna");
        assert!(store.profile("ana").is_none());
        assert_eq!(store.profile("anna").unwrap().bio, "Hi");
        assert!(store.authenticate("anna", "new-secret"));
    }

    #[test]
    fn test_delete_user() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = UserStore::open(temp_dir.path()).unwrap();
        let session = store.register(new_user("ana")).unwrap();

        store.delete_user(&session).unwrap();
        assert!(store.usernames().is_empty());
        assert_eq!(
            store.delete_user(&session),
            Err(UserError::UserNotFound("ana".to_string()))
        );
    }

    #[test]
    fn test_all_created_lists_later_user_wins() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = UserStore::open(temp_dir.path()).unwrap();
        let ana = store.register(new_user("ana")).unwrap();
        let bob = store.register(new_user("bob")).unwrap();

        let spot = Location::new("Pub", Category::Bar, 1.0, 2.0);
        store
            .user_mut(&ana)
            .unwrap()
            .created_lists
            .insert("Shared".to_string(), UserList::new(vec![spot.clone()]));
        store
            .user_mut(&bob)
            .unwrap()
            .created_lists
            .insert("Shared".to_string(), UserList::new(vec![spot.clone(), spot]));

        let lists = store.all_created_lists();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists["Shared"].owner, "bob");
        assert_eq!(lists["Shared"].locations.len(), 2);
    }

    #[test]
    fn test_import_profile_image() {
        let temp_dir = TempDir::new().unwrap();
        let store = UserStore::open(temp_dir.path()).unwrap();
        let source = temp_dir.path().join("me.png");
        fs::write(&source, b"png").unwrap();

        let stored = store.import_profile_image(&source).unwrap();
        assert_eq!(stored, temp_dir.path().join(UPLOAD_DIR).join("me.png"));
        assert!(stored.exists());
    }
}
