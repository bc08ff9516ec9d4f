//! User-created lists: create, edit, delete, like, save and rank.
//!
//! These operations work on an open [`UserStore`] in memory. Callers persist
//! the result with [`UserStore::save`].

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::user_store::{UserError, UserStore};
use crate::export::write_list_csv;
use crate::models::{ListView, Location, Selection, Session, UserList, UserRecord};

/// List-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// List name is empty
    EmptyName,
    /// A list with this name already exists
    NameTaken(String),
    /// No location was selected
    NoSelections,
    /// None of the selections matched a catalog location
    NothingResolved,
    /// No list with this name exists
    ListNotFound(String),
    /// The list belongs to another user
    NotOwner {
        /// List name
        list: String,
        /// Actual owner
        owner: String,
    },
    /// The acting user does not exist
    User(UserError),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => f.write_str("List name cannot be empty"),
            Self::NameTaken(name) => {
                write!(f, "A list named '{name}' already exists. Choose a different name.")
            }
            Self::NoSelections => f.write_str("Select at least one location"),
            Self::NothingResolved => {
                f.write_str("None of the selected locations exist in the catalog")
            }
            Self::ListNotFound(name) => write!(f, "List '{name}' not found"),
            Self::NotOwner { list, owner } => {
                write!(f, "List '{list}' belongs to '{owner}'")
            }
            Self::User(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ListError {}

impl From<UserError> for ListError {
    fn from(err: UserError) -> Self {
        Self::User(err)
    }
}

/// Result of creating or editing a list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOutcome {
    /// The stored list
    pub list: ListView,
    /// Selections with no matching catalog location (dropped)
    pub unresolved: Vec<Selection>,
}

/// Resolves selections against catalog locations.
///
/// Each selection takes the first catalog entry with the same name and
/// category. Returns the resolved locations in selection order and the
/// selections that matched nothing.
#[must_use]
pub fn resolve_selections(
    selections: &[Selection],
    catalog: &[Location],
) -> (Vec<Location>, Vec<Selection>) {
    let mut resolved = Vec::with_capacity(selections.len());
    let mut unresolved = Vec::new();

    for selection in selections {
        match catalog.iter().find(|location| location.matches(selection)) {
            Some(location) => resolved.push(location.clone()),
            None => {
                warn!(name = %selection.name, category = %selection.category, "Location not found in catalog");
                unresolved.push(selection.clone());
            }
        }
    }

    (resolved, unresolved)
}

/// File name used when saving a list: spaces become underscores.
///
/// # Examples
///
/// ```
/// use spoton::services::lists::saved_list_file_name;
///
/// assert_eq!(saved_list_file_name("Date Night"), "Date_Night_saved.csv");
/// ```
#[must_use]
pub fn saved_list_file_name(list_name: &str) -> String {
    format!("{}_saved.csv", list_name.replace(' ', "_"))
}

impl UserStore {
    /// Owner of the list with this name, following [`UserStore::all_created_lists`]
    /// precedence.
    #[must_use]
    pub fn list_owner(&self, list_name: &str) -> Option<&str> {
        self.users
            .values()
            .rev()
            .find(|record| record.created_lists.contains_key(list_name))
            .map(|record| record.username.as_str())
    }

    /// Looks up a list by name.
    pub fn list(&self, list_name: &str) -> Result<ListView, ListError> {
        let owner = self
            .list_owner(list_name)
            .ok_or_else(|| ListError::ListNotFound(list_name.to_string()))?;
        let record = &self.users[owner];
        let list = &record.created_lists[list_name];
        Ok(ListView {
            name: list_name.to_string(),
            owner: owner.to_string(),
            likes: list.likes,
            locations: list.locations.clone(),
        })
    }

    /// Creates a list owned by the session user.
    pub fn create_list(
        &mut self,
        session: &Session,
        name: &str,
        selections: &[Selection],
        catalog: &[Location],
    ) -> Result<ListOutcome, ListError> {
        self.user(session)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ListError::EmptyName);
        }
        if self.list_owner(name).is_some() {
            return Err(ListError::NameTaken(name.to_string()));
        }
        if selections.is_empty() {
            return Err(ListError::NoSelections);
        }

        let (locations, unresolved) = resolve_selections(selections, catalog);
        if locations.is_empty() {
            return Err(ListError::NothingResolved);
        }

        let record = self.user_mut(session)?;
        record
            .created_lists
            .insert(name.to_string(), UserList::new(locations));
        record.liked_lists.insert(name.to_string(), false);

        debug!(list = name, owner = session.username(), "Created list");
        Ok(ListOutcome {
            list: self.list(name)?,
            unresolved,
        })
    }

    /// Renames a list and/or replaces its locations.
    ///
    /// The like counter is kept. Every user's liked flag and saved entry for
    /// the old name moves to the new name.
    pub fn edit_list(
        &mut self,
        session: &Session,
        original: &str,
        new_name: &str,
        selections: &[Selection],
        catalog: &[Location],
    ) -> Result<ListOutcome, ListError> {
        self.require_owner(session, original)?;

        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(ListError::EmptyName);
        }
        if new_name != original && self.list_owner(new_name).is_some() {
            return Err(ListError::NameTaken(new_name.to_string()));
        }
        if selections.is_empty() {
            return Err(ListError::NoSelections);
        }

        let (locations, unresolved) = resolve_selections(selections, catalog);
        if locations.is_empty() {
            return Err(ListError::NothingResolved);
        }

        let record = self.user_mut(session)?;
        let mut list = record
            .created_lists
            .remove(original)
            .ok_or_else(|| ListError::ListNotFound(original.to_string()))?;
        list.locations = locations;
        record.created_lists.insert(new_name.to_string(), list);

        if new_name != original {
            for record in self.users.values_mut() {
                if let Some(liked) = record.liked_lists.remove(original) {
                    record.liked_lists.insert(new_name.to_string(), liked);
                }
                if let Some(path) = record.saved_lists.remove(original) {
                    record.saved_lists.insert(new_name.to_string(), path);
                }
            }
        }

        debug!(from = original, to = new_name, "Edited list");
        Ok(ListOutcome {
            list: self.list(new_name)?,
            unresolved,
        })
    }

    /// Deletes a list owned by the session user and clears every user's
    /// liked flag and saved entry for it.
    pub fn delete_list(&mut self, session: &Session, name: &str) -> Result<ListView, ListError> {
        let view = self.require_owner(session, name)?;

        self.user_mut(session)?.created_lists.remove(name);
        for record in self.users.values_mut() {
            record.liked_lists.remove(name);
            record.saved_lists.remove(name);
        }

        debug!(list = name, "Deleted list");
        Ok(view)
    }

    /// Likes a list. Liking an already-liked list changes nothing.
    ///
    /// Returns the list's like counter after the call.
    pub fn like_list(&mut self, session: &Session, name: &str) -> Result<u32, ListError> {
        self.user(session)?;
        let owner = self
            .list_owner(name)
            .ok_or_else(|| ListError::ListNotFound(name.to_string()))?
            .to_string();

        let user = self.user_mut(session)?;
        let already_liked = user.likes(name);
        user.liked_lists.insert(name.to_string(), true);

        let list = self
            .users
            .get_mut(&owner)
            .and_then(|record| record.created_lists.get_mut(name))
            .ok_or_else(|| ListError::ListNotFound(name.to_string()))?;
        if !already_liked {
            list.likes += 1;
        }
        Ok(list.likes)
    }

    /// Removes a like. The counter never goes below zero.
    ///
    /// Returns the list's like counter after the call.
    pub fn unlike_list(&mut self, session: &Session, name: &str) -> Result<u32, ListError> {
        self.user(session)?;
        let owner = self
            .list_owner(name)
            .ok_or_else(|| ListError::ListNotFound(name.to_string()))?
            .to_string();

        let user = self.user_mut(session)?;
        let was_liked = user.likes(name);
        user.liked_lists.insert(name.to_string(), false);

        let list = self
            .users
            .get_mut(&owner)
            .and_then(|record| record.created_lists.get_mut(name))
            .ok_or_else(|| ListError::ListNotFound(name.to_string()))?;
        if was_liked {
            list.likes = list.likes.saturating_sub(1);
        }
        Ok(list.likes)
    }

    /// Writes a list to `<dir>/<name>_saved.csv` and records it in the
    /// session user's saved lists.
    ///
    /// # Errors
    ///
    /// Returns a [`ListError`] (inside the `anyhow::Error`) if the list or user
    /// does not exist, or an I/O error if the file cannot be written.
    pub fn save_list(
        &mut self,
        session: &Session,
        name: &str,
        dir: &Path,
    ) -> anyhow::Result<PathBuf> {
        self.user(session)?;
        let list = self.list(name)?;
        let path = dir.join(saved_list_file_name(name));
        write_list_csv(&path, &list.locations)?;
        self.mark_saved(session, name, &path)?;
        Ok(path)
    }

    /// Records that the session user saved a list to `path`.
    pub fn mark_saved(
        &mut self,
        session: &Session,
        name: &str,
        path: &Path,
    ) -> Result<(), ListError> {
        self.list(name)?;
        self.user_mut(session)?
            .saved_lists
            .insert(name.to_string(), path.to_path_buf());
        Ok(())
    }

    /// Forgets a saved list. Returns the path that had been recorded.
    pub fn unsave_list(
        &mut self,
        session: &Session,
        name: &str,
    ) -> Result<Option<PathBuf>, ListError> {
        Ok(self.user_mut(session)?.saved_lists.remove(name))
    }

    /// Lists the session user currently likes that still exist.
    pub fn liked_lists(&self, session: &Session) -> Result<Vec<ListView>, ListError> {
        let user = self.user(session)?;
        Ok(user
            .liked_list_names()
            .filter_map(|name| self.list(name).ok())
            .collect())
    }

    /// Lists the session user has saved that still exist.
    pub fn saved_lists(&self, session: &Session) -> Result<Vec<ListView>, ListError> {
        let user = self.user(session)?;
        Ok(user
            .saved_lists
            .keys()
            .filter_map(|name| self.list(name).ok())
            .collect())
    }

    /// All lists ranked by like count, highest first. Ties keep name order.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<ListView> {
        let mut lists: Vec<ListView> = self.all_created_lists().into_values().collect();
        lists.sort_by(|a, b| b.likes.cmp(&a.likes));
        lists
    }

    fn require_owner(&self, session: &Session, name: &str) -> Result<ListView, ListError> {
        self.user(session)?;
        let view = self.list(name)?;
        if view.owner != session.username() {
            return Err(ListError::NotOwner {
                list: name.to_string(),
                owner: view.owner,
            });
        }
        Ok(view)
    }

    /// Withdraws a removed user's likes and clears every reference to the
    /// lists they created.
    pub(crate) fn release_user_lists(&mut self, removed: &UserRecord) {
        for name in removed.created_lists.keys() {
            for record in self.users.values_mut() {
                record.liked_lists.remove(name);
                record.saved_lists.remove(name);
            }
        }

        for name in removed.liked_list_names() {
            let Some(owner) = self.list_owner(name).map(str::to_string) else {
                continue;
            };
            if let Some(list) = self
                .users
                .get_mut(&owner)
                .and_then(|record| record.created_lists.get_mut(name))
            {
                list.likes = list.likes.saturating_sub(1);
            }
        }
    }
}
