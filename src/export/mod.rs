//! CSV export of user lists.
//!
//! Produces the liked-locations and saved-lists snapshots plus the
//! per-list files written when a user saves a list.

pub mod snapshot;

pub use snapshot::{write_liked_locations, write_list_csv, write_saved_lists};
