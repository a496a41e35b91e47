// src/config/mod.rs

//! Optional configuration file for shaderbuild.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate values (`validate.rs`).
//!
//! Command-line flags always take precedence over values from the file.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{BuildSection, ConfigFile, RawConfigFile};
pub use validate::validate_config;
