//! Service layer for business logic.
//!
//! This module contains services that encapsulate complex business logic
//! and coordinate between different parts of the application.

pub mod lists;
pub mod map_builder;
pub mod user_store;

// Re-export commonly used types and functions
pub use lists::{resolve_selections, saved_list_file_name, ListError, ListOutcome};
pub use map_builder::{MapRequest, MapService, MergedCatalog};
pub use user_store::{hash_password, NewUser, ProfileUpdate, UserError, UserStore};
