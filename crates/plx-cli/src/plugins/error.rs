use thiserror::Error;

use plx_config::{ConfigError, VenvPathError};
use plx_manifest::ManifestError;
use plx_schema::SchemaError;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment error: {0}")]
    Environment(#[from] VenvPathError),

    #[error("Installer error: {0}")]
    Installer(String),
}
