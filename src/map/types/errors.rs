use std::io;
use thiserror::Error;

/// Errors produced while loading a JSON memory map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("Not a valid .json file: {path}")]
    InvalidExtension { path: String },
    #[error("Failed to open '{path}'. \nError: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while reading '{path}'. \nError: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Memory map is not well-formed JSON. \nError: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
    #[error("Memory map nesting exceeds {limit} levels")]
    RecursionLimit { limit: u32 },
}
