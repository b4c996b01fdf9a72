//! Configuration and path resolution for the plx CLI
//!
//! Holds the `plx.toml` settings and the platform rules for locating the
//! plx data directory, the tool's virtual environment and its site-packages.

pub mod config;
pub mod venv_paths;

pub use config::{Config, ConfigError};
pub use venv_paths::{VenvLayout, VenvPathError};
