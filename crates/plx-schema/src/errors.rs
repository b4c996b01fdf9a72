use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Schema {name} does not exist.")]
    NotFound { name: String, path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse schema {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Schema {name} is not a valid draft-7 schema: {message}")]
    InvalidSchema { name: String, message: String },
}
