//! SpotOn Library
//!
//! This library provides the core functionality of SpotOn: loading venue
//! catalogs from CSV, composing them and user-created lists into a layered
//! map, and managing the users and lists behind it.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod map;
pub mod models;
pub mod parser;
pub mod services;
#[cfg(feature = "web")]
pub mod web;
