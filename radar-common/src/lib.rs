//! # Radar Common Library
//!
//! Shared code for the radar curation tools including:
//! - Error type shared by every tool
//! - TOML configuration file model and resolution
//! - SQLite connection helpers for the radar staging database

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
