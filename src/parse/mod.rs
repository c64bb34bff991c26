//! Parse phase: JSON → Rust types.

pub mod keyed;
pub mod types;

pub use keyed::Keyed;
pub use types::*;

use std::path::Path;

use crate::error::LoadError;

/// Deserialize a worldbook JSON string into a `Document`.
pub fn parse(json: &str) -> Result<Document, LoadError> {
    Ok(serde_json::from_str::<Document>(json)?)
}

/// Read and parse a worldbook file.
pub fn load(path: impl AsRef<Path>) -> Result<Document, LoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "worldbook read");
    parse(&json)
}
