//! Parsing and validation of `nomen.toml` project configuration files.
//!
//! The configuration names the program snapshot to analyze, adjusts rule
//! severities, picks the suffix comparison mode, and controls which
//! occurrence categories a rename rewrites.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
