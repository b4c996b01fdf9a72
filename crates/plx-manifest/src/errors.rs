use std::io;
use thiserror::Error;

/// Errors that can occur while reading or writing plx manifest data
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize tracking document: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid distribution metadata in {0}")]
    InvalidMetadata(String),
}
