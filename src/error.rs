//! Hard errors raised while acquiring a worldbook.
//!
//! Problems with the document's content are never errors: they become
//! [`Finding`](crate::findings::Finding)s. Only reading and parsing can fail.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to load {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse worldbook JSON: {0}")]
    Json(#[from] serde_json::Error),
}
