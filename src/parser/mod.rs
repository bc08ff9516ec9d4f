//! Parsing for catalog files.
//!
//! This module handles reading venue catalogs from delimited text files.

pub mod catalog;

// Re-export commonly used functions
pub use catalog::{load_locations, LoadError, LoadReport};
