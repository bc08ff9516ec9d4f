//! Data models for locations, categories, users and lists.
//!
//! This module contains the core data structures used throughout the application.
//! Models are designed to be independent of I/O and presentation.

pub mod category;
pub mod location;
pub mod marker_color;
pub mod user;

// Re-export all model types
pub use category::Category;
pub use location::{Location, Selection};
pub use marker_color::MarkerColor;
pub use user::{ListView, Session, UserList, UserRecord};
