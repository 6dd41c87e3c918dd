//! Memory-map ingestion.
//!
//! A memory map is a UTF-8 JSON document: an array of message objects, each
//! carrying its identifying strings, its per-side endianness tags, and a
//! `fields` array of `{op_name, length, src_offset, dst_offset}` objects
//! (offsets and lengths in bits). The loader walks the document in key
//! order and feeds every scalar to the stateful key handlers: a field
//! completes when its `dst_offset` is seen, a message completes when its
//! `dst_endian` is seen.
//!
//! Unknown keys are logged and skipped. Structural problems (unreadable
//! file, malformed JSON, runaway nesting) fail the load.

use std::fs::File;
use std::io::{BufReader, Read};

use encoding_rs::UTF_8;
use serde_json::Value;

use crate::map::core::{LoaderState, keys};
use crate::map::types::catalog::Catalog;
use crate::map::types::errors::MapError;

/// Deepest accepted nesting in a memory-map document.
pub(crate) const MAX_DEPTH: u32 = 100;

/// Parses a JSON memory map from disk and returns the populated [`Catalog`].
///
/// The file is read as raw bytes and decoded as UTF-8 (a byte-order mark
/// and stray invalid sequences are tolerated) before parsing.
///
/// # Errors
/// - [`MapError::InvalidExtension`] when the path does not end in `.json`.
/// - [`MapError::OpenFile`] / [`MapError::Read`] for I/O failures, with the
///   offending path attached.
/// - Everything [`from_str`] can return.
pub fn from_file(path: &str) -> Result<Catalog, MapError> {
    if !path.ends_with(".json") {
        return Err(MapError::InvalidExtension {
            path: path.to_string(),
        });
    }

    let file: File = File::open(path).map_err(|e| MapError::OpenFile {
        path: path.to_string(),
        source: e,
    })?;
    let mut reader: BufReader<File> = BufReader::new(file);

    let mut bytes: Vec<u8> = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|e| MapError::Read {
        path: path.to_string(),
        source: e,
    })?;

    let (text, _, _) = UTF_8.decode(&bytes);
    from_str(&text)
}

/// Parses a JSON memory map held in memory.
///
/// # Errors
/// - [`MapError::Json`] when the document is not well-formed JSON.
/// - [`MapError::RecursionLimit`] when nesting exceeds [`MAX_DEPTH`] levels.
pub fn from_str(text: &str) -> Result<Catalog, MapError> {
    let root: Value = serde_json::from_str(text).map_err(|e| MapError::Json { source: e })?;

    let mut state: LoaderState = LoaderState::new();
    match &root {
        Value::Object(entries) => walk_object(entries, 1, &mut state)?,
        Value::Array(items) => walk_array(items, "", 1, &mut state)?,
        _ => tracing::warn!("memory map root is not an object or array, nothing loaded"),
    }

    Ok(state.finish())
}

fn walk_object(
    entries: &serde_json::Map<String, Value>,
    depth: u32,
    state: &mut LoaderState,
) -> Result<(), MapError> {
    check_depth(depth)?;

    for (key, value) in entries {
        match value {
            Value::Number(_) | Value::String(_) => keys::load_scalar(key, value, state),
            Value::Array(items) => walk_array(items, key, depth + 1, state)?,
            Value::Object(_) => {
                tracing::warn!(key, "nested object in memory map, skipped");
            }
            _ => tracing::warn!(key, "unknown json type in memory map, skipped"),
        }
    }

    Ok(())
}

fn walk_array(
    items: &[Value],
    key: &str,
    depth: u32,
    state: &mut LoaderState,
) -> Result<(), MapError> {
    check_depth(depth)?;

    for item in items {
        match item {
            Value::Object(entries) => walk_object(entries, depth + 1, state)?,
            Value::Array(inner) => walk_array(inner, key, depth + 1, state)?,
            // Bare scalars inherit the array's key.
            scalar => keys::load_scalar(key, scalar, state),
        }
    }

    Ok(())
}

fn check_depth(depth: u32) -> Result<(), MapError> {
    if depth > MAX_DEPTH {
        Err(MapError::RecursionLimit { limit: MAX_DEPTH })
    } else {
        Ok(())
    }
}
