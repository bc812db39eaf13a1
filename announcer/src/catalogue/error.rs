//! Catalogue loading error types.

use std::path::PathBuf;

/// Errors that can occur when loading an audio catalogue.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    /// The catalogue file could not be read
    #[error("failed to read catalogue {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalogue is not valid JSON
    #[error("catalogue JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required table is empty
    #[error("catalogue table is empty: {0}")]
    Empty(&'static str),
}
